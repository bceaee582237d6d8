//! Dashboard handlers.

use axum::Form;
use demo_shop_core::ContactDetails;
use serde::Deserialize;
use tracing::instrument;

use super::respond;
use crate::error::Result;
use crate::middleware::{CspNonce, Visit};
use crate::view::{FormEcho, PageTemplate};

/// Dashboard profile form data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProfileForm {
    pub full_name: String,
    pub phone: String,
}

/// Save the dashboard profile form.
#[instrument(skip_all)]
pub async fn save_profile(
    mut visit: Visit,
    CspNonce(nonce): CspNonce,
    Form(form): Form<ProfileForm>,
) -> Result<PageTemplate> {
    let echo = FormEcho::new()
        .with("full-name", &form.full_name)
        .with("phone", &form.phone);
    let outcome = visit.controller_mut().save_profile(ContactDetails {
        full_name: form.full_name,
        phone: form.phone,
    });
    respond(visit, outcome, echo, nonce).await
}
