//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use demo_shop_core::{Fixtures, ViewController, ViewState};
use moka::future::Cache;
use tokio::sync::Mutex;

use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the configuration and the mock data every visit is checked against.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    fixtures: Arc<Fixtures>,
    visit_locks: Cache<String, Arc<Mutex<()>>>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, fixtures: Fixtures) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                fixtures: Arc::new(fixtures),
                visit_locks: Cache::builder()
                    .max_capacity(10_000)
                    .time_to_idle(Duration::from_secs(3600)) // 1 hour
                    .build(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a shared handle to the fixtures.
    #[must_use]
    pub fn fixtures(&self) -> Arc<Fixtures> {
        Arc::clone(&self.inner.fixtures)
    }

    /// A controller for a visitor, resumed from `state` or freshly started.
    #[must_use]
    pub fn controller(&self, state: Option<ViewState>) -> ViewController {
        match state {
            Some(state) => ViewController::from_state(state, self.fixtures()),
            None => ViewController::new(self.fixtures()),
        }
    }

    /// The lock serializing requests that carry session cookie `cookie`.
    pub async fn visit_lock(&self, cookie: &str) -> Arc<Mutex<()>> {
        self.inner
            .visit_locks
            .get_with(cookie.to_owned(), async { Arc::new(Mutex::new(())) })
            .await
    }
}
