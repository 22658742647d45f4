//! Integration tests for the Weil Glass storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p weilglass-integration-tests
//! ```
//!
//! The storefront router runs in-process with an in-memory session store, so
//! no database is needed. [`TestApp`] behaves like one browser: it keeps the
//! session cookie between requests, so the cart persists across page loads.

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use secrecy::SecretString;
use tower::ServiceExt;
use tower_sessions::MemoryStore;
use weilglass_storefront::catalog::Catalog;
use weilglass_storefront::config::StorefrontConfig;
use weilglass_storefront::middleware::session::{SESSION_COOKIE_NAME, session_layer};
use weilglass_storefront::state::AppState;

/// Catalog used by the tests.
pub const TEST_CATALOG: &str = r#"[
    {"id": "amber-vase", "name": "Amber Vase", "price": "120.00", "category": "vessels",
     "description": "Hand-blown amber glass."},
    {"id": "cobalt-bowl", "name": "Cobalt Bowl", "price": "45.50", "category": "bowls"}
]"#;

/// Form body adding the amber vase from the given page.
#[must_use]
pub fn add_vase_form(page: &str) -> String {
    format!("id=amber-vase&name=Amber+Vase&price=120.00&category=vessels&page={page}")
}

/// Form body adding the cobalt bowl from the given page.
#[must_use]
pub fn add_bowl_form(page: &str) -> String {
    format!("id=cobalt-bowl&name=Cobalt+Bowl&price=45.50&category=bowls&page={page}")
}

/// Storefront configuration pointing at the crate's own static assets.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    let storefront_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/../storefront");

    StorefrontConfig {
        database_url: SecretString::from("postgres://localhost/unused"),
        host: std::net::IpAddr::from([127, 0, 0, 1]),
        port: 3000,
        base_url: "http://localhost:3000".to_string(),
        catalog_path: format!("{storefront_dir}/content/catalog.json").into(),
        static_dir: format!("{storefront_dir}/static").into(),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_traces_sample_rate: 0.0,
    }
}

/// A response with its body read to a string.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `HX-Trigger` header, if any.
    #[must_use]
    pub fn hx_trigger(&self) -> Option<&str> {
        self.headers
            .get("HX-Trigger")
            .and_then(|value| value.to_str().ok())
    }
}

/// One browser talking to an in-process storefront.
pub struct TestApp {
    router: Router,
    cookie: Option<String>,
}

impl TestApp {
    /// Storefront with [`TEST_CATALOG`].
    ///
    /// # Panics
    ///
    /// Panics if the test catalog is invalid.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn new() -> Self {
        Self::with_catalog(Catalog::from_json(TEST_CATALOG).unwrap())
    }

    /// Storefront with a custom catalog.
    #[must_use]
    pub fn with_catalog(catalog: Catalog) -> Self {
        let state = AppState::new(test_config(), catalog);
        let router = weilglass_storefront::app(state)
            .layer(session_layer(MemoryStore::default(), false));

        Self {
            router,
            cookie: None,
        }
    }

    /// Another browser on the same server: shares the session store, not the cookie.
    #[must_use]
    pub fn other_browser(&self) -> Self {
        Self {
            router: self.router.clone(),
            cookie: None,
        }
    }

    /// Send `GET path`.
    pub async fn get(&mut self, path: &str) -> TestResponse {
        self.send(Request::get(path), Body::empty()).await
    }

    /// Send `POST path` with an urlencoded form body.
    pub async fn post_form(&mut self, path: &str, form: &str) -> TestResponse {
        let builder = Request::post(path).header(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        );
        self.send(builder, Body::from(form.to_owned())).await
    }

    #[allow(clippy::unwrap_used)]
    async fn send(&mut self, mut builder: axum::http::request::Builder, body: Body) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        if let Some(cookie) = session_cookie(response.headers()) {
            self.cookie = Some(cookie);
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// The `name=value` pair of the session cookie set by a response.
fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|cookie| cookie.split(';').next())
        .find(|pair| pair.starts_with(&format!("{SESSION_COOKIE_NAME}=")))
        .map(str::to_owned)
}
