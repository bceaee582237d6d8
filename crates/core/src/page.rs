//! The pages of the single-page storefront.
//!
//! Exactly one page is visible at a time. The DOM id of each page is part of
//! the contract with the browser automation suite and must not change.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown page id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown page: {0}")]
pub struct UnknownPageError(pub String);

/// A page of the storefront, identified by its DOM id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PageId {
    #[default]
    Login,
    Signup,
    Onboarding,
    Dashboard,
    Products,
    Cart,
    Checkout,
    Orders,
    OrderSuccess,
}

impl PageId {
    /// Every page, in the order they appear in the document.
    pub const ALL: [Self; 9] = [
        Self::Login,
        Self::Signup,
        Self::Onboarding,
        Self::Dashboard,
        Self::Products,
        Self::Cart,
        Self::Checkout,
        Self::Orders,
        Self::OrderSuccess,
    ];

    /// The DOM id of the page element.
    #[must_use]
    pub const fn dom_id(&self) -> &'static str {
        match self {
            Self::Login => "login-page",
            Self::Signup => "signup-page",
            Self::Onboarding => "onboarding-page",
            Self::Dashboard => "dashboard-page",
            Self::Products => "products-page",
            Self::Cart => "cart-page",
            Self::Checkout => "checkout-page",
            Self::Orders => "orders-page",
            Self::OrderSuccess => "order-success-page",
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dom_id())
    }
}

impl FromStr for PageId {
    type Err = UnknownPageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|page| page.dom_id() == s)
            .ok_or_else(|| UnknownPageError(s.to_string()))
    }
}
