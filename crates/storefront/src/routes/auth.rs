//! Authentication route handlers.
//!
//! Credentials are checked against the fixture credential table; nothing is
//! persisted beyond the visit's session.

use axum::Form;
use serde::Deserialize;
use tracing::instrument;

use super::respond;
use crate::error::Result;
use crate::middleware::{CspNonce, Visit};
use crate::view::{FormEcho, PageTemplate};

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Sign-up form data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle login form submission.
#[instrument(skip_all, fields(username = %form.username))]
pub async fn login(
    mut visit: Visit,
    CspNonce(nonce): CspNonce,
    Form(form): Form<LoginForm>,
) -> Result<PageTemplate> {
    let outcome = visit.controller_mut().login(&form.username, &form.password);
    if outcome.is_ok() {
        tracing::info!("User logged in");
    }

    let echo = FormEcho::new().with("username", &form.username);
    respond(visit, outcome, echo, nonce).await
}

/// Handle sign-up form submission.
#[instrument(skip_all, fields(email = %form.email))]
pub async fn signup(
    mut visit: Visit,
    CspNonce(nonce): CspNonce,
    Form(form): Form<SignupForm>,
) -> Result<PageTemplate> {
    let outcome = visit
        .controller_mut()
        .signup(&form.email, &form.password, &form.confirm_password);

    let echo = if outcome.is_ok() {
        FormEcho::new()
    } else {
        FormEcho::new().with("signup-email", &form.email)
    };
    respond(visit, outcome, echo, nonce).await
}

/// Handle logout.
///
/// Clears the user and cart and issues a fresh session id.
#[instrument(skip_all)]
pub async fn logout(mut visit: Visit, CspNonce(nonce): CspNonce) -> Result<PageTemplate> {
    visit.controller_mut().logout();
    visit.session().cycle_id().await?;
    tracing::info!("User logged out");
    respond(visit, Ok(None), FormEcho::new(), nonce).await
}
