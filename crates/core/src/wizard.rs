//! The five-step onboarding wizard.
//!
//! ```text
//! 1 welcome -> 2 profile -> 3 preferences -> 4 verification -> 5 complete
//! ```
//!
//! Transitions are linear and forward-only. Step 2 gates on first name and
//! email; step 4 is left through
//! [`ViewController::verify_email`](crate::ViewController::verify_email).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::feedback::{ControllerError, Field};

/// Position in the onboarding sequence, always within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct WizardStep(u8);

impl WizardStep {
    pub const WELCOME: Self = Self(1);
    pub const PROFILE: Self = Self(2);
    pub const PREFERENCES: Self = Self(3);
    pub const VERIFICATION: Self = Self(4);
    pub const COMPLETE: Self = Self(5);

    /// Build a step from its number.
    #[must_use]
    pub const fn new(step: u8) -> Option<Self> {
        if step >= Self::WELCOME.0 && step <= Self::COMPLETE.0 {
            Some(Self(step))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// The following step, or `None` at the last step.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        Self::new(self.0 + 1)
    }

    #[must_use]
    pub const fn is_last(self) -> bool {
        self.0 == Self::COMPLETE.0
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::WELCOME
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("wizard step out of range: {value}"))
    }
}

impl From<WizardStep> for u8 {
    fn from(step: WizardStep) -> Self {
        step.0
    }
}

/// Values typed into the step-2 profile form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl ProfileDraft {
    /// Required fields that are still empty.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<Field> {
        let mut missing = Vec::new();
        if self.first_name.is_empty() {
            missing.push(Field::FirstName);
        }
        if self.email.is_empty() {
            missing.push(Field::Email);
        }
        missing
    }
}

/// Wizard state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wizard {
    step: WizardStep,
    verification_visible: bool,
    profile: ProfileDraft,
    preferences: BTreeSet<u8>,
}

impl Wizard {
    /// Number of selectable preference options on step 3.
    pub const PREFERENCE_OPTIONS: u8 = 3;

    #[must_use]
    pub const fn step(&self) -> WizardStep {
        self.step
    }

    /// Whether the verification-code input has been revealed.
    #[must_use]
    pub const fn verification_visible(&self) -> bool {
        self.verification_visible
    }

    #[must_use]
    pub const fn profile(&self) -> &ProfileDraft {
        &self.profile
    }

    #[must_use]
    pub const fn preferences(&self) -> &BTreeSet<u8> {
        &self.preferences
    }

    /// Replace the step-2 form values.
    pub fn set_profile(&mut self, profile: ProfileDraft) {
        self.profile = profile;
    }

    /// Toggle a step-3 preference option, returning whether it is now selected.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::UnknownPreference`] for options outside
    /// `1..=PREFERENCE_OPTIONS`.
    pub fn toggle_preference(&mut self, option: u8) -> Result<bool, ControllerError> {
        if option == 0 || option > Self::PREFERENCE_OPTIONS {
            return Err(ControllerError::UnknownPreference(option));
        }
        if self.preferences.remove(&option) {
            Ok(false)
        } else {
            self.preferences.insert(option);
            Ok(true)
        }
    }

    /// Move forward one step.
    ///
    /// Does nothing at the last step. Leaving step 2 requires a first name and
    /// an email; every missing field is reported and the step is kept.
    /// Entering step 4 reveals the verification-code input.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::MissingFields`] when the step-2 gate fails.
    pub fn advance(&mut self) -> Result<(), ControllerError> {
        let Some(next) = self.step.next() else {
            return Ok(());
        };

        if self.step == WizardStep::PROFILE {
            let missing = self.profile.missing_fields();
            if !missing.is_empty() {
                return Err(ControllerError::MissingFields(missing));
            }
        }

        self.step = next;
        if next == WizardStep::VERIFICATION {
            self.verification_visible = true;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn filled_profile() -> ProfileDraft {
        ProfileDraft {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john.doe@example.com".to_string(),
        }
    }

    #[test]
    fn test_step_bounds() {
        assert!(WizardStep::new(0).is_none());
        assert!(WizardStep::new(6).is_none());
        assert_eq!(WizardStep::new(3), Some(WizardStep::PREFERENCES));
        assert_eq!(WizardStep::COMPLETE.next(), None);
        assert!(serde_json::from_str::<WizardStep>("9").is_err());
    }

    #[test]
    fn test_profile_gate_reports_every_missing_field() {
        let mut wizard = Wizard::default();
        wizard.advance().unwrap();
        assert_eq!(wizard.step(), WizardStep::PROFILE);

        let err = wizard.advance().unwrap_err();
        assert_eq!(err.fields(), &[Field::FirstName, Field::Email]);
        assert_eq!(wizard.step(), WizardStep::PROFILE);

        wizard.set_profile(ProfileDraft {
            first_name: "John".to_string(),
            ..ProfileDraft::default()
        });
        let err = wizard.advance().unwrap_err();
        assert_eq!(err.fields(), &[Field::Email]);
        assert_eq!(wizard.step(), WizardStep::PROFILE);
    }

    #[test]
    fn test_last_name_is_optional() {
        let mut wizard = Wizard::default();
        wizard.advance().unwrap();
        wizard.set_profile(ProfileDraft {
            last_name: String::new(),
            ..filled_profile()
        });
        wizard.advance().unwrap();
        assert_eq!(wizard.step(), WizardStep::PREFERENCES);
    }

    #[test]
    fn test_verification_revealed_on_step_four() {
        let mut wizard = Wizard::default();
        wizard.set_profile(filled_profile());
        wizard.advance().unwrap();
        wizard.advance().unwrap();
        assert!(!wizard.verification_visible());
        wizard.advance().unwrap();
        assert_eq!(wizard.step(), WizardStep::VERIFICATION);
        assert!(wizard.verification_visible());
    }

    #[test]
    fn test_advance_is_noop_at_last_step() {
        let mut wizard = Wizard::default();
        wizard.set_profile(filled_profile());
        for _ in 0..4 {
            wizard.advance().unwrap();
        }
        assert_eq!(wizard.step(), WizardStep::COMPLETE);
        wizard.advance().unwrap();
        assert_eq!(wizard.step(), WizardStep::COMPLETE);
    }

    #[test]
    fn test_toggle_preference() {
        let mut wizard = Wizard::default();
        assert!(wizard.toggle_preference(1).unwrap());
        assert!(wizard.toggle_preference(3).unwrap());
        assert!(!wizard.toggle_preference(1).unwrap());
        assert_eq!(wizard.preferences().iter().copied().collect::<Vec<_>>(), vec![3]);
        assert_eq!(
            wizard.toggle_preference(4),
            Err(ControllerError::UnknownPreference(4))
        );
    }
}
