//! Integration tests for Demo Shop.
//!
//! Each test starts the storefront router in-process on an ephemeral port and
//! drives it with a cookie-keeping `reqwest` client, the way a browser would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p demo-shop-integration-tests
//! ```

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};

use demo_shop_core::Fixtures;
use demo_shop_storefront::config::StorefrontConfig;
use demo_shop_storefront::state::AppState;
use reqwest::{Client, RequestBuilder, Response, StatusCode};

/// Errors raised while driving a test server.
#[derive(Debug, thiserror::Error)]
pub enum TestError {
    #[error("listener error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("fixtures error: {0}")]
    Fixtures(#[from] demo_shop_core::FixturesError),
    #[error("test server stopped: {0}")]
    ServerStopped(String),
}

/// A running storefront and a client holding one visitor's session.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub fixtures: Arc<Fixtures>,
    server_error: Arc<OnceLock<String>>,
}

impl TestContext {
    /// Start a storefront with the built-in fixtures.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener or client cannot be created.
    pub async fn new() -> Result<Self, TestError> {
        Self::with_fixtures(Fixtures::default()).await
    }

    /// Start a storefront with custom fixtures.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener or client cannot be created.
    pub async fn with_fixtures(fixtures: Fixtures) -> Result<Self, TestError> {
        let listener =
            tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let shared = Arc::new(fixtures.clone());
        let state = AppState::new(StorefrontConfig::default(), fixtures);
        let app = demo_shop_storefront::app(state);
        let server_error = Arc::new(OnceLock::new());
        let slot = Arc::clone(&server_error);
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Test server stopped");
                let _ = slot.set(e.to_string());
            }
        });

        let client = Client::builder().cookie_store(true).build()?;
        Ok(Self {
            client,
            base_url: format!("http://{addr}"),
            fixtures: shared,
            server_error,
        })
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET `path` and return status and body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get(&self, path: &str) -> Result<Page, TestError> {
        self.send(self.client.get(self.url(path))).await
    }

    /// POST a form to `path` and return status and body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn post(&self, path: &str, form: &[(&str, &str)]) -> Result<Page, TestError> {
        self.send(self.client.post(self.url(path)).form(form)).await
    }

    /// Send `request`; a failure after the server stopped reports why it
    /// stopped.
    async fn send(&self, request: RequestBuilder) -> Result<Page, TestError> {
        match request.send().await {
            Ok(response) => Page::read(response).await,
            Err(e) => Err(self
                .server_error
                .get()
                .map_or(TestError::Http(e), |reason| {
                    TestError::ServerStopped(reason.clone())
                })),
        }
    }

    /// `showPage(page_id)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn show_page(&self, page_id: &str) -> Result<Page, TestError> {
        self.get(&format!("/pages/{page_id}")).await
    }
}

/// A rendered response.
pub struct Page {
    pub status: StatusCode,
    pub body: String,
}

impl Page {
    async fn read(response: Response) -> Result<Self, TestError> {
        let status = response.status();
        let body = response.text().await?;
        Ok(Self { status, body })
    }

    /// Whether an element with `data-testid` is rendered.
    #[must_use]
    pub fn has_testid(&self, testid: &str) -> bool {
        self.body.contains(&format!(r#"data-testid="{testid}""#))
    }

    /// Text content of the first element with `data-testid`, up to the next
    /// tag.
    #[must_use]
    pub fn testid_text(&self, testid: &str) -> Option<&str> {
        let marker = format!(r#"data-testid="{testid}""#);
        let start = self.body.find(&marker)? + marker.len();
        let rest = self.body.get(start..)?;
        let open_end = rest.find('>')? + 1;
        let text = rest.get(open_end..)?;
        let close = text.find('<')?;
        text.get(..close).map(str::trim)
    }

    /// Whether the section with DOM id `page_id` is the visible one.
    #[must_use]
    pub fn is_visible(&self, page_id: &str) -> bool {
        let visible = format!(r#"<section id="{page_id}" class="page">"#);
        self.body.contains(&visible)
    }

    /// Value attribute of the input with `data-testid`.
    #[must_use]
    pub fn input_value(&self, testid: &str) -> Option<&str> {
        let marker = format!(r#"data-testid="{testid}" value=""#);
        let start = self.body.find(&marker)? + marker.len();
        let rest = self.body.get(start..)?;
        rest.get(..rest.find('"')?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_failed_request_reports_stopped_server() -> Result<(), TestError> {
        // A port nobody listens on any more
        let listener =
            tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;
        drop(listener);

        let server_error = Arc::new(OnceLock::new());
        server_error.set("address in use".to_string()).unwrap();
        let ctx = TestContext {
            client: Client::new(),
            base_url: format!("http://{addr}"),
            fixtures: Arc::new(Fixtures::default()),
            server_error,
        };

        match ctx.get("/").await {
            Err(TestError::ServerStopped(reason)) => assert_eq!(reason, "address in use"),
            Err(e) => panic!("expected the server's own error, got {e}"),
            Ok(page) => panic!("expected a failure, got {}", page.status),
        }
        Ok(())
    }
}
