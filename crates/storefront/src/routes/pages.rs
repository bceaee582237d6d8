//! Page navigation handlers.

use axum::extract::Path;
use demo_shop_core::PageId;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::{CspNonce, Visit};
use crate::view::PageTemplate;

/// Render whatever page the visit is on. A first visit starts on the login
/// page with the demo user pre-populated.
///
/// Nothing changes, so nothing is stored: a cookieless hit creates no session.
#[instrument(skip_all)]
pub async fn index(visit: Visit, CspNonce(nonce): CspNonce) -> Result<PageTemplate> {
    Ok(PageTemplate::new(visit.controller(), nonce))
}

/// Make `page_id` the visible page (`showPage`).
#[instrument(skip(visit, nonce))]
pub async fn show(
    Path(page_id): Path<String>,
    mut visit: Visit,
    CspNonce(nonce): CspNonce,
) -> Result<PageTemplate> {
    let page: PageId = page_id
        .parse()
        .map_err(|e: demo_shop_core::UnknownPageError| AppError::NotFound(e.to_string()))?;

    visit.controller_mut().show_page(page);
    let controller = visit.save().await?;
    Ok(PageTemplate::new(&controller, nonce))
}

/// Liveness health check endpoint.
pub async fn health() -> &'static str {
    "ok"
}
