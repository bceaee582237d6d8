//! Page rendering.
//!
//! Every response is the full single-page document. [`PageTemplate`] projects
//! a [`ViewState`] onto the template: only the active page's section carries
//! content, the rest are empty hidden sections so every `data-testid` on the
//! page is unique.

use std::collections::BTreeMap;

use askama::Template;
use askama_web::WebTemplate;
use demo_shop_core::{
    CartView, ControllerError, ErrorSlot, Field, Notice, OrderRecord, Outcome, PageId, Product,
    ViewController, ViewState,
};

use crate::filters;

/// Labels of the onboarding preference options, in option order.
const PREFERENCE_LABELS: [&str; 3] = ["电子产品", "时尚服饰", "家居生活"];

// =============================================================================
// Feedback
// =============================================================================

/// A notice ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeView {
    pub testid: &'static str,
    pub text: String,
    /// Render as the skip confirmation dialog.
    pub confirm_skip: bool,
}

impl From<&Notice> for NoticeView {
    fn from(notice: &Notice) -> Self {
        Self {
            testid: notice.testid(),
            text: notice.to_string(),
            confirm_skip: matches!(notice, Notice::ConfirmSkip),
        }
    }
}

/// What the last operation wants the visitor to see, sorted into slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feedback {
    field_errors: Vec<Field>,
    /// Shared login error (`error-message`).
    pub error_message: Option<String>,
    /// Checkout payment panel (`payment-error`).
    pub payment_error: Option<String>,
    /// Blocking alert banner.
    pub alert: Option<String>,
    pub notice: Option<NoticeView>,
}

impl Feedback {
    #[must_use]
    pub fn from_outcome(outcome: &Outcome) -> Self {
        match outcome {
            Ok(None) => Self::default(),
            Ok(Some(notice)) => Self {
                notice: Some(NoticeView::from(notice)),
                ..Self::default()
            },
            Err(err) => Self::from_error(err),
        }
    }

    #[must_use]
    pub fn from_error(err: &ControllerError) -> Self {
        let text = Some(err.to_string());
        match err.slot() {
            ErrorSlot::Inline => Self {
                field_errors: err.fields().to_vec(),
                ..Self::default()
            },
            ErrorSlot::Message => Self {
                error_message: text,
                ..Self::default()
            },
            ErrorSlot::Payment => Self {
                payment_error: text,
                ..Self::default()
            },
            ErrorSlot::Alert => Self {
                alert: text,
                ..Self::default()
            },
        }
    }

    /// Inline message for the error element with `testid`, if it is raised.
    #[must_use]
    pub fn field_error(&self, testid: &str) -> Option<&'static str> {
        self.field_errors
            .iter()
            .find(|field| field.error_testid() == testid)
            .map(Field::message)
    }

    #[must_use]
    pub fn confirm_skip(&self) -> bool {
        self.notice.as_ref().is_some_and(|notice| notice.confirm_skip)
    }
}

// =============================================================================
// Form echo
// =============================================================================

/// Submitted form values rendered back into their inputs, keyed by input id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormEcho(BTreeMap<&'static str, String>);

impl FormEcho {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Echo `value` into the input `id`.
    #[must_use]
    pub fn with(mut self, id: &'static str, value: &str) -> Self {
        self.0.insert(id, value.to_string());
        self
    }

    /// Fill `id` from stored state unless the form echoes a value for it.
    fn seed(&mut self, id: &'static str, value: &str) {
        let current = self.0.entry(id).or_default();
        if current.is_empty() {
            *current = value.to_string();
        }
    }

    /// Value for the input `id`; empty when nothing was submitted.
    #[must_use]
    pub fn get(&self, id: &str) -> &str {
        self.0.get(id).map_or("", String::as_str)
    }
}

// =============================================================================
// Projections
// =============================================================================

#[derive(Debug, Clone)]
pub struct PreferenceView {
    pub option: u8,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct OrderView {
    pub number: String,
    pub placed_at: String,
    pub item_count: usize,
    pub total: String,
}

impl From<&OrderRecord> for OrderView {
    fn from(order: &OrderRecord) -> Self {
        Self {
            number: order.number.to_string(),
            placed_at: order.placed_at.format("%Y-%m-%d %H:%M").to_string(),
            item_count: order.lines.len(),
            total: order.total.to_string(),
        }
    }
}

/// The single-page storefront document.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct PageTemplate {
    pub nonce: String,
    /// DOM id of the visible page.
    pub active: &'static str,
    pub logged_in: bool,
    pub user_name: String,
    pub user_email: String,
    pub cart: CartView,
    pub products: Vec<Product>,
    pub selected: Option<Product>,
    pub wizard_step: u8,
    pub verification_visible: bool,
    pub preferences: Vec<PreferenceView>,
    pub orders: Vec<OrderView>,
    pub last_order: Option<OrderView>,
    pub feedback: Feedback,
    pub form: FormEcho,
}

impl PageTemplate {
    /// Render the controller's state with the outcome of the last operation.
    #[must_use]
    pub fn with_outcome(
        controller: &ViewController,
        outcome: &Outcome,
        form: FormEcho,
        nonce: String,
    ) -> Self {
        Self::build(controller, Feedback::from_outcome(outcome), form, nonce)
    }

    /// Render the controller's state without feedback.
    #[must_use]
    pub fn new(controller: &ViewController, nonce: String) -> Self {
        Self::build(controller, Feedback::default(), FormEcho::new(), nonce)
    }

    fn build(
        controller: &ViewController,
        feedback: Feedback,
        mut form: FormEcho,
        nonce: String,
    ) -> Self {
        let state: &ViewState = controller.state();
        seed_form(&mut form, state);

        let (user_name, user_email) = state
            .user
            .as_ref()
            .map(|user| (user.name.clone(), user.email.to_string()))
            .unwrap_or_default();

        let selected = state
            .selected_product
            .and_then(|id| controller.catalog().get(id))
            .cloned();

        let preferences = PREFERENCE_LABELS
            .into_iter()
            .zip(1u8..)
            .map(|(label, option)| PreferenceView {
                option,
                label,
                selected: state.wizard.preferences().contains(&option),
            })
            .collect();

        Self {
            nonce,
            active: state.page.dom_id(),
            logged_in: state.user.is_some(),
            user_name,
            user_email,
            cart: controller.cart_view(),
            products: controller.catalog().iter().cloned().collect(),
            selected,
            wizard_step: state.wizard.step().get(),
            verification_visible: state.wizard.verification_visible(),
            preferences,
            orders: state.orders.iter().rev().map(OrderView::from).collect(),
            last_order: state.last_order().map(OrderView::from),
            feedback,
            form,
        }
    }
}

/// Prefill inputs from what the visit already saved.
fn seed_form(form: &mut FormEcho, state: &ViewState) {
    match state.page {
        PageId::Onboarding => {
            let profile = state.wizard.profile();
            form.seed("first-name", &profile.first_name);
            form.seed("last-name", &profile.last_name);
            form.seed("profile-email", &profile.email);
        }
        PageId::Dashboard => {
            if let Some(contact) = &state.contact {
                form.seed("full-name", &contact.full_name);
                form.seed("phone", &contact.phone);
            }
        }
        PageId::Checkout => {
            if let Some(shipping) = &state.shipping {
                form.seed("shipping-name", &shipping.name);
                form.seed("shipping-address", &shipping.address);
                form.seed("shipping-city", &shipping.city);
                form.seed("shipping-zip", &shipping.zip);
            }
        }
        _ => {}
    }
}
