//! Integration tests for the QuickBite storefront.
//!
//! Tests drive the full router in-process with `tower::ServiceExt::oneshot`;
//! no server or network is involved. Each [`TestContext`] gets its own data
//! directory so the saved cart can be inspected and reloaded.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p quickbite-integration-tests
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, header},
    response::Response,
};
use quickbite_storefront::{
    app,
    catalog::Catalog,
    config::StorefrontConfig,
    controller::Timings,
    state::AppState,
    storage::FileStorage,
};
use tempfile::TempDir;
use tower::ServiceExt;

/// Timer durations short enough to wait out in a test.
pub const FAST_TIMINGS: Timings = Timings {
    notification: Duration::from_millis(40),
    checkout_delay: Duration::from_millis(40),
};

/// A storefront backed by a temporary data directory.
pub struct TestContext {
    pub state: AppState,
    data_dir: TempDir,
}

impl TestContext {
    /// A fresh storefront with an empty data directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let data_dir = tempfile::tempdir().expect("create temp data dir");
        let state = start(data_dir.path());
        Self { state, data_dir }
    }

    /// A second storefront over the same data directory, as after a restart.
    #[must_use]
    pub fn restart(&self) -> AppState {
        start(self.data_dir.path())
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.data_dir.path()
    }

    /// The saved cart file, if one has been written.
    #[must_use]
    pub fn saved_cart(&self) -> Option<String> {
        std::fs::read_to_string(self.data_dir.path().join("cart.json")).ok()
    }

    #[must_use]
    pub fn router(&self) -> Router {
        app(self.state.clone())
    }

    /// `GET path`.
    pub async fn get(&self, path: &str) -> Response {
        send(&self.router(), get_request(path)).await
    }

    /// An HTMX control event on `container`.
    pub async fn event(&self, container: &str, control: &str) -> Response {
        let body = format!("control={}", form_encode(control));
        send(&self.router(), event_request(container, body, true)).await
    }

    /// A plain (non-HTMX) form post of a control event.
    pub async fn form_post(&self, container: &str, control: &str) -> Response {
        let body = format!("control={}", form_encode(control));
        send(&self.router(), event_request(container, body, false)).await
    }

    /// Typing `term` into the search box.
    pub async fn search(&self, term: &str) -> Response {
        let body = format!("q={}", form_encode(term));
        send(&self.router(), event_request("search", body, true)).await
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

fn start(data_dir: &Path) -> AppState {
    let config = StorefrontConfig {
        data_dir: data_dir.to_path_buf(),
        timings: FAST_TIMINGS,
        static_dir: static_dir(),
        ..StorefrontConfig::default()
    };
    AppState::new(config, Catalog::builtin(), FileStorage::new(data_dir))
}

fn static_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../storefront/static")
}

/// Read a response body as UTF-8.
///
/// # Panics
///
/// Panics if the body cannot be read or is not UTF-8.
pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

async fn send(router: &Router, request: Request<Body>) -> Response {
    router
        .clone()
        .oneshot(request)
        .await
        .unwrap_or_else(|never| match never {})
}

fn get_request(path: &str) -> Request<Body> {
    Request::get(path)
        .body(Body::empty())
        .expect("valid request")
}

fn event_request(container: &str, body: String, htmx: bool) -> Request<Body> {
    let mut builder = Request::post(format!("/events/{container}"))
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if htmx {
        builder = builder.header("HX-Request", "true");
    }
    builder.body(Body::from(body)).expect("valid request")
}

fn form_encode(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            ' ' => "+".to_string(),
            c if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') => c.to_string(),
            c => {
                let mut buf = [0; 4];
                c.encode_utf8(&mut buf)
                    .bytes()
                    .map(|b| format!("%{b:02X}"))
                    .collect()
            }
        })
        .collect()
}
