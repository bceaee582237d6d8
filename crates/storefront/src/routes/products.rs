//! Product route handlers.

use axum::{Form, extract::Path};
use demo_shop_core::ProductId;
use serde::Deserialize;
use tracing::instrument;

use super::respond;
use crate::error::Result;
use crate::middleware::{CspNonce, Visit};
use crate::view::{FormEcho, PageTemplate};

/// Search form data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub term: String,
}

/// Open a product tile's detail panel.
#[instrument(skip(visit, nonce))]
pub async fn show(
    Path(id): Path<u32>,
    mut visit: Visit,
    CspNonce(nonce): CspNonce,
) -> Result<PageTemplate> {
    let outcome = visit.controller_mut().select_product(ProductId::new(id));
    respond(visit, outcome, FormEcho::new(), nonce).await
}

/// Submit a catalog search. The grid is not filtered.
#[instrument(skip_all, fields(term = %form.term))]
pub async fn search(
    visit: Visit,
    CspNonce(nonce): CspNonce,
    Form(form): Form<SearchForm>,
) -> Result<PageTemplate> {
    let outcome = visit.controller().search_products(&form.term);
    let echo = FormEcho::new().with("search-input", &form.term);
    respond(visit, outcome, echo, nonce).await
}
