//! Per-visitor request serialization.
//!
//! A visit's view state is loaded when a handler starts and written back by
//! the session layer once the response is built. Requests carrying the same
//! session cookie therefore run one at a time, each seeing the state the
//! previous one stored. This layer must wrap the session layer.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use tower_sessions::cookie::Cookie;

use super::session::SESSION_COOKIE_NAME;
use crate::state::AppState;

/// Middleware that holds the visitor's lock for the whole request.
///
/// Requests without a session cookie start a new session each and run
/// unlocked.
pub async fn visit_lock_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(cookie) = session_cookie(request.headers()) else {
        return next.run(request).await;
    };

    let lock = state.visit_lock(&cookie).await;
    let _guard = lock.lock().await;
    next.run(request).await
}

/// Raw value of the session cookie, if the request carries one.
fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_owned())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use axum::{
        Router, body::Body, http::HeaderValue, middleware::from_fn_with_state, routing::get,
    };
    use demo_shop_core::Fixtures;
    use tower::ServiceExt;

    use super::*;
    use crate::config::StorefrontConfig;

    #[test]
    fn test_session_cookie_found_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; demo_shop_session=abc.def; lang=zh"),
        );
        assert_eq!(session_cookie(&headers).as_deref(), Some("abc.def"));
    }

    #[test]
    fn test_session_cookie_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(session_cookie(&headers), None);
        assert_eq!(session_cookie(&HeaderMap::new()), None);
    }

    /// A router whose handler records in `peak` the most requests it saw
    /// running at once.
    fn counting_app(
        state: AppState,
        running: Arc<AtomicUsize>,
        peak: Arc<AtomicUsize>,
    ) -> Router {
        Router::new()
            .route(
                "/",
                get(move || {
                    let running = Arc::clone(&running);
                    let peak = Arc::clone(&peak);
                    async move {
                        let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                        peak.fetch_max(now, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(20)).await;
                        running.fetch_sub(1, Ordering::SeqCst);
                        "ok"
                    }
                }),
            )
            .layer(from_fn_with_state(state, visit_lock_middleware))
    }

    fn request(cookie: &'static str) -> Request {
        Request::builder()
            .uri("/")
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_same_visitor_runs_one_at_a_time() {
        let state = AppState::new(StorefrontConfig::default(), Fixtures::default());
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let app = counting_app(state, Arc::clone(&running), Arc::clone(&peak));

        let requests = (0..5).map(|_| app.clone().oneshot(request("demo_shop_session=same")));
        for response in spawn_all(requests).await {
            assert!(response.unwrap().status().is_success());
        }
        assert_eq!(peak.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_different_visitors_run_concurrently() {
        let state = AppState::new(StorefrontConfig::default(), Fixtures::default());
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let app = counting_app(state, Arc::clone(&running), Arc::clone(&peak));

        let (a, b) = tokio::join!(
            app.clone().oneshot(request("demo_shop_session=first")),
            app.clone().oneshot(request("demo_shop_session=second")),
        );
        assert!(a.unwrap().status().is_success());
        assert!(b.unwrap().status().is_success());
        assert_eq!(peak.load(Ordering::SeqCst), 2);
    }

    async fn spawn_all<F>(futures: impl Iterator<Item = F>) -> Vec<F::Output>
    where
        F: std::future::Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let handles: Vec<_> = futures.map(tokio::spawn).collect();
        let mut outputs = Vec::with_capacity(handles.len());
        for handle in handles {
            outputs.push(handle.await.unwrap());
        }
        outputs
    }
}
