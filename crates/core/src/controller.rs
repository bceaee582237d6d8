//! The view controller.
//!
//! [`ViewState`] is everything a visitor's page depends on. [`ViewController`]
//! owns one state together with the [`Fixtures`] it is checked against and is
//! the only thing that mutates it. Each operation runs to completion and
//! returns an [`Outcome`]: `Ok` with an optional [`Notice`] on success, or a
//! [`ControllerError`] that left the state unchanged.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartLine, CartView};
use crate::feedback::{ControllerError, Field, Notice};
use crate::fixtures::{Fixtures, ProductCatalog};
use crate::page::PageId;
use crate::session::SessionUser;
use crate::types::{OrderNumber, Price, ProductId};
use crate::wizard::{ProfileDraft, Wizard};

/// Result of a controller operation.
pub type Outcome = Result<Option<Notice>, ControllerError>;

/// Shipping form values, retained after a successful save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingDetails {
    pub name: String,
    pub address: String,
    pub city: String,
    pub zip: String,
}

impl ShippingDetails {
    fn is_complete(&self) -> bool {
        [&self.name, &self.address, &self.city, &self.zip]
            .iter()
            .all(|value| !value.is_empty())
    }
}

/// Dashboard profile form values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub full_name: String,
    pub phone: String,
}

/// A completed mock purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub number: OrderNumber,
    pub lines: Vec<CartLine>,
    pub total: Price,
    pub placed_at: DateTime<Utc>,
}

/// Per-visitor UI state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    /// The single visible page.
    pub page: PageId,
    pub user: Option<SessionUser>,
    pub cart: Cart,
    /// Product opened from the grid; its detail panel offers add-to-cart.
    pub selected_product: Option<ProductId>,
    pub wizard: Wizard,
    pub shipping: Option<ShippingDetails>,
    pub contact: Option<ContactDetails>,
    /// Completed orders, oldest first.
    pub orders: Vec<OrderRecord>,
}

impl ViewState {
    /// State of a fresh visit: the demo user is pre-populated and the login
    /// page is shown.
    #[must_use]
    pub fn startup(fixtures: &Fixtures) -> Self {
        Self {
            user: fixtures.credentials.default_user(),
            ..Self::default()
        }
    }

    /// The most recent order, shown on the success page.
    #[must_use]
    pub fn last_order(&self) -> Option<&OrderRecord> {
        self.orders.last()
    }
}

/// Owns a [`ViewState`] and applies storefront operations to it.
#[derive(Debug, Clone)]
pub struct ViewController {
    state: ViewState,
    fixtures: Arc<Fixtures>,
}

impl ViewController {
    /// Start a fresh visit.
    #[must_use]
    pub fn new(fixtures: Arc<Fixtures>) -> Self {
        let state = ViewState::startup(&fixtures);
        Self { state, fixtures }
    }

    /// Resume a visit from previously stored state.
    #[must_use]
    pub const fn from_state(state: ViewState, fixtures: Arc<Fixtures>) -> Self {
        Self { state, fixtures }
    }

    #[must_use]
    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> ViewState {
        self.state
    }

    #[must_use]
    pub fn catalog(&self) -> &ProductCatalog {
        &self.fixtures.catalog
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Make `page` the only visible page.
    pub fn show_page(&mut self, page: PageId) {
        self.state.page = page;
    }

    pub fn show_login(&mut self) {
        self.show_page(PageId::Login);
    }

    pub fn show_signup(&mut self) {
        self.show_page(PageId::Signup);
    }

    pub fn show_dashboard(&mut self) {
        self.show_page(PageId::Dashboard);
    }

    pub fn show_products(&mut self) {
        self.show_page(PageId::Products);
    }

    pub fn show_cart(&mut self) {
        self.show_page(PageId::Cart);
    }

    pub fn show_checkout(&mut self) {
        self.show_page(PageId::Checkout);
    }

    pub fn show_orders(&mut self) {
        self.show_page(PageId::Orders);
    }

    /// Leave the order confirmation for the dashboard.
    pub fn go_to_dashboard(&mut self) {
        self.show_dashboard();
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Log in against the credential table.
    ///
    /// # Errors
    ///
    /// - [`ControllerError::MissingFields`] naming every empty field
    /// - [`ControllerError::InvalidCredentials`] for the known-invalid pair
    /// - [`ControllerError::WrongUsernameOrPassword`] otherwise
    pub fn login(&mut self, username: &str, password: &str) -> Outcome {
        let mut missing = Vec::new();
        if username.is_empty() {
            missing.push(Field::Username);
        }
        if password.is_empty() {
            missing.push(Field::Password);
        }
        if !missing.is_empty() {
            return Err(ControllerError::MissingFields(missing));
        }

        let user = self.fixtures.credentials.authenticate(username, password)?;
        self.state.user = Some(user);
        self.show_dashboard();
        Ok(None)
    }

    /// Register a new account. Nothing is stored; only the confirmation must
    /// match.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::PasswordMismatch`] if the passwords differ.
    pub fn signup(&mut self, _email: &str, password: &str, confirm_password: &str) -> Outcome {
        if password != confirm_password {
            return Err(ControllerError::PasswordMismatch);
        }
        self.show_login();
        Ok(Some(Notice::SignupComplete))
    }

    /// Clear the session and cart and return to the login page.
    pub fn logout(&mut self) {
        self.state.user = None;
        self.state.cart.clear();
        self.show_login();
    }

    // =========================================================================
    // Onboarding
    // =========================================================================

    /// Record the step-2 form values without advancing.
    pub fn set_profile_draft(&mut self, draft: ProfileDraft) {
        self.state.wizard.set_profile(draft);
    }

    /// Advance the wizard one step.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::MissingFields`] if step 2 is incomplete.
    pub fn advance(&mut self) -> Outcome {
        self.state.wizard.advance()?;
        Ok(None)
    }

    /// Toggle a step-3 preference option.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::UnknownPreference`] for an unknown option.
    pub fn toggle_preference(&mut self, option: u8) -> Outcome {
        self.state.wizard.toggle_preference(option)?;
        Ok(None)
    }

    /// Check the emailed verification code and advance on a match.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::WrongVerificationCode`] on mismatch.
    pub fn verify_email(&mut self, code: &str) -> Outcome {
        if code != self.fixtures.verification_code {
            return Err(ControllerError::WrongVerificationCode);
        }
        self.advance()
    }

    /// Leave onboarding for the dashboard.
    ///
    /// Without `confirmed` nothing changes and [`Notice::ConfirmSkip`] asks
    /// for confirmation. The wizard position is abandoned, not reset.
    #[allow(clippy::unnecessary_wraps)]
    pub fn skip_onboarding(&mut self, confirmed: bool) -> Outcome {
        if !confirmed {
            return Ok(Some(Notice::ConfirmSkip));
        }
        self.show_dashboard();
        Ok(None)
    }

    // =========================================================================
    // Dashboard
    // =========================================================================

    /// Save the dashboard profile form.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::IncompleteProfile`] if a field is empty.
    pub fn save_profile(&mut self, contact: ContactDetails) -> Outcome {
        if contact.full_name.is_empty() || contact.phone.is_empty() {
            return Err(ControllerError::IncompleteProfile);
        }
        self.state.contact = Some(contact);
        Ok(Some(Notice::ProfileSaved))
    }

    // =========================================================================
    // Products & Cart
    // =========================================================================

    /// Acknowledge a search. The catalog is not filtered.
    #[allow(clippy::unused_self, clippy::unnecessary_wraps)]
    pub fn search_products(&self, term: &str) -> Outcome {
        Ok(Some(Notice::SearchSubmitted {
            term: term.to_string(),
        }))
    }

    /// Open a product from the grid and show the products page.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::UnknownProduct`] if `product_id` is not in
    /// the catalog.
    pub fn select_product(&mut self, product_id: ProductId) -> Outcome {
        if self.fixtures.catalog.get(product_id).is_none() {
            return Err(ControllerError::UnknownProduct(product_id));
        }
        self.state.selected_product = Some(product_id);
        self.show_products();
        Ok(None)
    }

    /// Append a catalog product to the cart.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::UnknownProduct`] if `product_id` is not in
    /// the catalog; the cart is unchanged.
    pub fn add_to_cart(&mut self, product_id: ProductId) -> Outcome {
        let product = self
            .fixtures
            .catalog
            .get(product_id)
            .ok_or(ControllerError::UnknownProduct(product_id))?;
        self.state.cart.push(product);
        Ok(Some(Notice::AddedToCart {
            name: product.name.clone(),
        }))
    }

    /// Remove the cart line at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::CartIndexOutOfRange`] for a stale index.
    pub fn remove_from_cart(&mut self, index: usize) -> Outcome {
        self.state.cart.remove(index)?;
        Ok(None)
    }

    /// Lines and total as currently displayed.
    #[must_use]
    pub fn cart_view(&self) -> CartView {
        self.state.cart.view()
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Validate and keep the shipping details.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::IncompleteShipping`] if any field is empty.
    pub fn save_shipping(&mut self, details: ShippingDetails) -> Outcome {
        if !details.is_complete() {
            return Err(ControllerError::IncompleteShipping);
        }
        self.state.shipping = Some(details);
        Ok(Some(Notice::ShippingSaved))
    }

    /// Run the mock payment.
    ///
    /// Any filled-in card other than the decline card succeeds: the cart
    /// becomes an order, is emptied, and the success page is shown.
    ///
    /// # Errors
    ///
    /// - [`ControllerError::IncompletePayment`] if a field is empty
    /// - [`ControllerError::PaymentDeclined`] for the decline card; cart and
    ///   session are untouched so the visitor can retry
    pub fn process_payment(
        &mut self,
        card_number: &str,
        card_expiry: &str,
        card_cvv: &str,
    ) -> Outcome {
        if card_number.is_empty() || card_expiry.is_empty() || card_cvv.is_empty() {
            return Err(ControllerError::IncompletePayment);
        }
        if card_number == self.fixtures.decline_card {
            return Err(ControllerError::PaymentDeclined);
        }

        let total = self.state.cart.total();
        let lines = self.state.cart.drain();
        self.state.orders.push(OrderRecord {
            number: OrderNumber::generate(),
            lines,
            total,
            placed_at: Utc::now(),
        });
        self.show_page(PageId::OrderSuccess);
        Ok(None)
    }
}
