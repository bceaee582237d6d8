//! Onboarding wizard handlers.

use axum::Form;
use demo_shop_core::{ProfileDraft, WizardStep};
use serde::Deserialize;
use tracing::instrument;

use super::respond;
use crate::error::Result;
use crate::middleware::{CspNonce, Visit};
use crate::view::{FormEcho, PageTemplate};

/// Wizard "next" form. Only the profile step carries fields.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NextForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct PreferenceForm {
    pub option: u8,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VerifyForm {
    pub code: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SkipForm {
    pub confirmed: bool,
}

/// Advance the wizard one step.
#[instrument(skip_all)]
pub async fn next(
    mut visit: Visit,
    CspNonce(nonce): CspNonce,
    Form(form): Form<NextForm>,
) -> Result<PageTemplate> {
    let controller = visit.controller_mut();
    let step = controller.state().wizard.step();
    tracing::debug!(step = step.get(), "Advancing wizard");

    let mut echo = FormEcho::new();
    if step == WizardStep::PROFILE {
        echo = echo
            .with("first-name", &form.first_name)
            .with("last-name", &form.last_name)
            .with("profile-email", &form.email);
        controller.set_profile_draft(ProfileDraft {
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
        });
    }

    let outcome = controller.advance();
    respond(visit, outcome, echo, nonce).await
}

/// Toggle a step-3 preference option.
#[instrument(skip_all, fields(option = form.option))]
pub async fn toggle_preference(
    mut visit: Visit,
    CspNonce(nonce): CspNonce,
    Form(form): Form<PreferenceForm>,
) -> Result<PageTemplate> {
    let outcome = visit.controller_mut().toggle_preference(form.option);
    respond(visit, outcome, FormEcho::new(), nonce).await
}

/// Check the emailed verification code.
#[instrument(skip_all)]
pub async fn verify(
    mut visit: Visit,
    CspNonce(nonce): CspNonce,
    Form(form): Form<VerifyForm>,
) -> Result<PageTemplate> {
    let outcome = visit.controller_mut().verify_email(form.code.trim());
    respond(visit, outcome, FormEcho::new(), nonce).await
}

/// Skip onboarding. The first request asks for confirmation.
#[instrument(skip_all, fields(confirmed = form.confirmed))]
pub async fn skip(
    mut visit: Visit,
    CspNonce(nonce): CspNonce,
    Form(form): Form<SkipForm>,
) -> Result<PageTemplate> {
    let outcome = visit.controller_mut().skip_onboarding(form.confirmed);
    respond(visit, outcome, FormEcho::new(), nonce).await
}
