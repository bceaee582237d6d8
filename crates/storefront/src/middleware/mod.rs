//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. CSP nonce (generate per-request nonce for the page script)
//! 5. Security headers (CSP, frame denial, etc.)
//! 6. Visit lock (one request at a time per session cookie)
//! 7. Session layer (tower-sessions with a bounded in-memory store)
//!
//! [`Visit`] is an extractor, not a layer: it reads the session installed by
//! the session layer.

pub mod csp;
pub mod request_id;
pub mod security_headers;
pub mod session;
pub mod visit;
pub mod visit_lock;

pub use csp::{CspNonce, csp_nonce_middleware};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
pub use visit::Visit;
pub use visit_lock::visit_lock_middleware;
