//! Session-related types.
//!
//! A visit is stored as one serialized [`ViewState`](demo_shop_core::ViewState)
//! under [`keys::VIEW_STATE`].

/// Session keys.
pub mod keys {
    /// Key for the visitor's serialized view state.
    pub const VIEW_STATE: &str = "view_state";
}
