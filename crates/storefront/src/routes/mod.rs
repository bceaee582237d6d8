//! HTTP route handlers for storefront.
//!
//! Every handler applies one [`ViewController`](demo_shop_core::ViewController)
//! operation to the visitor's session state and renders the full page.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                         - Render the current page
//! GET  /health                   - Health check
//! GET  /pages/{page_id}          - Show a page by DOM id
//!
//! # Auth
//! POST /auth/login               - Log in
//! POST /auth/signup              - Sign up
//! POST /auth/logout              - Log out
//!
//! # Onboarding
//! POST /onboarding/next          - Advance the wizard (step 2 carries the profile form)
//! POST /onboarding/preferences   - Toggle a preference option
//! POST /onboarding/verify        - Check the verification code
//! POST /onboarding/skip          - Skip (confirmed=true to confirm)
//!
//! # Dashboard
//! POST /profile                  - Save contact details
//!
//! # Products & Cart
//! GET  /products/{id}            - Open a product's detail panel
//! POST /products/search          - Submit a search
//! POST /cart/add                 - Add to cart
//! POST /cart/remove              - Remove a cart line
//!
//! # Checkout
//! POST /checkout/shipping        - Save shipping details
//! POST /checkout/payment         - Mock payment
//! ```

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod dashboard;
pub mod onboarding;
pub mod pages;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};
use demo_shop_core::Outcome;

use crate::error::Result;
use crate::middleware::Visit;
use crate::state::AppState;
use crate::view::{FormEcho, PageTemplate};

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/signup", post(auth::signup))
        .route("/logout", post(auth::logout))
}

/// Create the onboarding routes router.
pub fn onboarding_routes() -> Router<AppState> {
    Router::new()
        .route("/next", post(onboarding::next))
        .route("/preferences", post(onboarding::toggle_preference))
        .route("/verify", post(onboarding::verify))
        .route("/skip", post(onboarding::skip))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/search", post(products::search))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/shipping", post(checkout::save_shipping))
        .route("/payment", post(checkout::payment))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::index))
        .route("/health", get(pages::health))
        .route("/pages/{page_id}", get(pages::show))
        .route("/profile", post(dashboard::save_profile))
        .nest("/auth", auth_routes())
        .nest("/onboarding", onboarding_routes())
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
}

/// Store the visit and render the page with the operation's feedback.
async fn respond(
    visit: Visit,
    outcome: Outcome,
    form: FormEcho,
    nonce: String,
) -> Result<PageTemplate> {
    match &outcome {
        Ok(Some(notice)) => tracing::debug!(%notice, "Operation succeeded"),
        Ok(None) => {}
        Err(e) => tracing::info!(error = %e, "Operation rejected"),
    }

    let controller = visit.save().await?;
    Ok(PageTemplate::with_outcome(&controller, &outcome, form, nonce))
}
