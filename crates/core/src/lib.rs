//! Demo Shop Core - view state machine and domain types.
//!
//! This crate holds everything the storefront needs to decide what a visitor
//! sees next. It is used by:
//! - `storefront` - axum binary that renders [`ViewState`] as HTML
//! - `integration-tests` - end-to-end request tests
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O,
//! no HTTP, no rendering. Every operation of [`ViewController`] runs to
//! completion synchronously and reports its outcome as a value, so the whole
//! storefront flow can be tested without a browser.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices and emails
//! - [`page`] - The pages of the single-page storefront
//! - [`fixtures`] - Injectable mock data (catalog, credentials, magic values)
//! - [`cart`] - Cart lines and totals
//! - [`wizard`] - The five-step onboarding wizard
//! - [`feedback`] - Errors and notices surfaced to the visitor
//! - [`session`] - The signed-in demo user
//! - [`controller`] - The [`ViewController`] tying it all together

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod controller;
pub mod feedback;
pub mod fixtures;
pub mod page;
pub mod session;
pub mod types;
pub mod wizard;

pub use cart::{Cart, CartItemView, CartLine, CartView};
pub use controller::{
    ContactDetails, OrderRecord, Outcome, ShippingDetails, ViewController, ViewState,
};
pub use feedback::{ControllerError, ErrorSlot, Field, Notice};
pub use fixtures::{
    CredentialTable, DemoAccount, Fixtures, FixturesError, KnownInvalidLogin, Product,
    ProductCatalog,
};
pub use page::{PageId, UnknownPageError};
pub use session::SessionUser;
pub use types::*;
pub use wizard::{ProfileDraft, Wizard, WizardStep};
