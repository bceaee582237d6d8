//! Checkout handlers.
//!
//! Shipping and payment share one form, so both handlers receive every
//! checkout field and echo them back; a declined card can be retried by
//! changing only the card number.

use axum::Form;
use demo_shop_core::ShippingDetails;
use serde::Deserialize;
use tracing::instrument;

use super::respond;
use crate::error::{Result, add_breadcrumb};
use crate::middleware::{CspNonce, Visit};
use crate::view::{FormEcho, PageTemplate};

/// Checkout form data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CheckoutForm {
    pub name: String,
    pub address: String,
    pub city: String,
    pub zip: String,
    pub card_number: String,
    pub card_expiry: String,
    pub card_cvv: String,
}

impl CheckoutForm {
    fn echo(&self) -> FormEcho {
        FormEcho::new()
            .with("shipping-name", &self.name)
            .with("shipping-address", &self.address)
            .with("shipping-city", &self.city)
            .with("shipping-zip", &self.zip)
            .with("card-number", &self.card_number)
            .with("card-expiry", &self.card_expiry)
            .with("card-cvv", &self.card_cvv)
    }

    fn shipping(&self) -> ShippingDetails {
        ShippingDetails {
            name: self.name.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            zip: self.zip.clone(),
        }
    }
}

/// Save the shipping details.
#[instrument(skip_all)]
pub async fn save_shipping(
    mut visit: Visit,
    CspNonce(nonce): CspNonce,
    Form(form): Form<CheckoutForm>,
) -> Result<PageTemplate> {
    let outcome = visit.controller_mut().save_shipping(form.shipping());
    respond(visit, outcome, form.echo(), nonce).await
}

/// Run the mock payment.
#[instrument(skip_all)]
pub async fn payment(
    mut visit: Visit,
    CspNonce(nonce): CspNonce,
    Form(form): Form<CheckoutForm>,
) -> Result<PageTemplate> {
    let outcome = visit.controller_mut().process_payment(
        &form.card_number,
        &form.card_expiry,
        &form.card_cvv,
    );

    match &outcome {
        Ok(_) => {
            if let Some(order) = visit.controller().state().last_order() {
                tracing::info!(order_number = %order.number, total = %order.total, "Order placed");
                add_breadcrumb(
                    "checkout",
                    "Order placed",
                    Some(&[("order_number", order.number.as_str())]),
                );
            }
        }
        Err(e) => tracing::warn!(error = %e, "Payment not completed"),
    }

    respond(visit, outcome, form.echo(), nonce).await
}
