//! The signed-in demo user.

use serde::{Deserialize, Serialize};

use crate::types::Email;

/// The currently authenticated demo user.
///
/// Either fully populated or absent; there is no partial session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: Email,
}

impl SessionUser {
    /// Build a user whose display name is the local part of the email.
    #[must_use]
    pub fn from_email(email: Email) -> Self {
        Self {
            name: email.local_part().to_string(),
            email,
        }
    }
}
