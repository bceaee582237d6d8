//! Visit extractor.
//!
//! Loads the visitor's [`ViewController`] from the session. Handlers apply one
//! operation to it and call [`Visit::save`] before rendering.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use demo_shop_core::{ViewController, ViewState};
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::session_keys;
use crate::state::AppState;

/// A visitor's controller bound to their session.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(mut visit: Visit) -> Result<impl IntoResponse> {
///     visit.controller_mut().show_page(PageId::Cart);
///     let controller = visit.save().await?;
///     // render from `controller.state()`
/// }
/// ```
pub struct Visit {
    session: Session,
    controller: ViewController,
}

impl<S> FromRequestParts<S> for Visit
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app = AppState::from_ref(state);

        // Set by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer not installed".to_string()))?;

        let saved = match session.get::<ViewState>(session_keys::VIEW_STATE).await {
            Ok(saved) => saved,
            // A state written by an older build; start the visit over
            Err(tower_sessions::session::Error::SerdeJson(e)) => {
                tracing::warn!(error = %e, "Discarding unreadable view state");
                None
            }
            Err(e) => return Err(e.into()),
        };

        if saved.is_none() {
            tracing::debug!("Starting new visit");
        }

        Ok(Self {
            session,
            controller: app.controller(saved),
        })
    }
}

impl Visit {
    #[must_use]
    pub const fn controller(&self) -> &ViewController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ViewController {
        &mut self.controller
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Store the view state back into the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn save(self) -> Result<ViewController, AppError> {
        self.session
            .insert(session_keys::VIEW_STATE, self.controller.state())
            .await?;
        Ok(self.controller)
    }
}
