//! Session middleware configuration.
//!
//! Sets up in-memory sessions using tower-sessions with a signed cookie.
//! The whole view state of a visit lives in its session record. Records are
//! held in a bounded `moka` cache that also drops them once they expire.

use rand::RngCore;
use secrecy::ExposeSecret;
use tower_sessions::cookie::Key;
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_moka_store::MokaStore;

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "demo_shop_session";

/// Session expiry time in seconds (1 day).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Most sessions kept in memory; the least recently used are evicted first.
const MAX_SESSIONS: u64 = 10_000;

/// Create the session layer with a bounded in-memory store.
#[must_use]
pub fn create_session_layer(
    config: &StorefrontConfig,
) -> SessionManagerLayer<MokaStore, SignedCookie> {
    SessionManagerLayer::new(MokaStore::new(Some(MAX_SESSIONS)))
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(signing_key(config))
}

/// Cookie signing key from the configured secret, or a fresh random key.
///
/// Without a configured secret, sessions do not survive a restart.
fn signing_key(config: &StorefrontConfig) -> Key {
    match &config.session_secret {
        Some(secret) => Key::from(secret.expose_secret().as_bytes()),
        None => {
            tracing::warn!("STOREFRONT_SESSION_SECRET not set, using a random signing key");
            let mut bytes = [0u8; 64];
            rand::rng().fill_bytes(&mut bytes);
            Key::from(&bytes[..])
        }
    }
}
