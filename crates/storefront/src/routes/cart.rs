//! Cart route handlers.
//!
//! The cart lives in the visit's session state; lines are addressed by their
//! position as rendered.

use axum::Form;
use demo_shop_core::ProductId;
use serde::Deserialize;
use tracing::instrument;

use super::respond;
use crate::error::{Result, add_breadcrumb};
use crate::middleware::{CspNonce, Visit};
use crate::view::{FormEcho, PageTemplate};

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub index: usize,
}

/// Add a catalog product to the cart.
#[instrument(skip_all, fields(product_id = form.product_id))]
pub async fn add(
    mut visit: Visit,
    CspNonce(nonce): CspNonce,
    Form(form): Form<AddToCartForm>,
) -> Result<PageTemplate> {
    let outcome = visit
        .controller_mut()
        .add_to_cart(ProductId::new(form.product_id));

    if outcome.is_ok() {
        let product_id = form.product_id.to_string();
        add_breadcrumb("cart", "Added to cart", Some(&[("product_id", product_id.as_str())]));
    }
    respond(visit, outcome, FormEcho::new(), nonce).await
}

/// Remove the cart line at the submitted index.
#[instrument(skip_all, fields(index = form.index))]
pub async fn remove(
    mut visit: Visit,
    CspNonce(nonce): CspNonce,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<PageTemplate> {
    let outcome = visit.controller_mut().remove_from_cart(form.index);
    respond(visit, outcome, FormEcho::new(), nonce).await
}
