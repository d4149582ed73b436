//! Test harnesses for driving the Gemvault routers in-process.
//!
//! Requests go straight into the `axum::Router` with
//! `tower::ServiceExt::oneshot`; no sockets, database or Sentry are needed.
//! The admin harness uses the in-memory credential store and a manual
//! clock so session expiry can be tested by moving time forward.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p gemvault-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::missing_panics_doc)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, Response, header},
};
use chrono::{DateTime, Duration, Utc};
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;

use gemvault_admin::clock::ManualClock;
use gemvault_admin::db::MemoryCredentialStore;
use gemvault_admin::services::{SessionTokenCodec, set_credentials};
use gemvault_admin::state::AppState as AdminState;
use gemvault_storefront::config::StorefrontConfig;
use gemvault_storefront::state::AppState as StorefrontState;

/// Signing secret used by the admin harness.
pub const TEST_SECRET: &str = "kX9#mQ2$vL7@pR4!wN8&jT5*bH3^cF6%";
/// Seeded administrator username.
pub const ADMIN_USERNAME: &str = "admin";
/// Seeded administrator password.
pub const ADMIN_PASSWORD: &str = "correct horse battery";

// =============================================================================
// Request/response helpers
// =============================================================================

/// Build a request with an optional JSON body and an optional `Cookie`.
#[must_use]
pub fn request(method: Method, uri: &str, body: Option<&Value>, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// All `Set-Cookie` header values on a response.
#[must_use]
pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_owned())
        .collect()
}

/// The `Set-Cookie` value for `name`, if the response sets it.
#[must_use]
pub fn set_cookie_for(response: &Response<Body>, name: &str) -> Option<String> {
    set_cookies(response)
        .into_iter()
        .find(|c| c.starts_with(&format!("{name}=")))
}

/// The `name=value` pair of a `Set-Cookie` header, ready to send back.
#[must_use]
pub fn cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap_or_default().trim().to_owned()
}

/// The `Location` header of a redirect.
#[must_use]
pub fn location(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_owned())
}

/// Read the whole body as text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Read the whole body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

// =============================================================================
// Admin
// =============================================================================

/// Admin router over an in-memory credential store and a manual clock.
pub struct AdminHarness {
    pub app: Router,
    pub clock: Arc<ManualClock>,
    pub store: Arc<MemoryCredentialStore>,
}

impl AdminHarness {
    /// Start time of the manual clock.
    #[must_use]
    pub fn start_time() -> DateTime<Utc> {
        DateTime::from_timestamp(1_750_000_000, 0).unwrap()
    }

    /// Harness with the default administrator seeded.
    pub async fn new() -> Self {
        let store = Arc::new(MemoryCredentialStore::new());
        set_credentials(store.as_ref(), ADMIN_USERNAME, ADMIN_PASSWORD)
            .await
            .unwrap();

        let clock = Arc::new(ManualClock::new(Self::start_time()));
        let state = AdminState::new(
            store.clone(),
            codec(TEST_SECRET),
            clock.clone(),
            false,
        );

        Self {
            app: gemvault_admin::app(state),
            clock,
            store,
        }
    }

    /// Send one request.
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app.clone().oneshot(request).await.unwrap()
    }

    /// POST /admin/login with the given credentials.
    pub async fn login(&self, username: &str, password: &str) -> Response<Body> {
        let body = serde_json::json!({ "username": username, "password": password });
        self.send(request(Method::POST, "/admin/login", Some(&body), None))
            .await
    }

    /// Log in and return the cookie pair to send on later requests.
    pub async fn login_cookie(&self, username: &str, password: &str) -> String {
        let response = self.login(username, password).await;
        let set_cookie = set_cookie_for(&response, "gemvault_admin_session")
            .expect("login should set the session cookie");
        cookie_pair(&set_cookie)
    }

    /// GET `uri` with an optional cookie.
    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        self.send(request(Method::GET, uri, None, cookie)).await
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        self.clock.advance(by);
    }
}

/// Token codec with a 24 hour lifetime.
#[must_use]
pub fn codec(secret: &str) -> SessionTokenCodec {
    SessionTokenCodec::new(&SecretString::from(secret.to_owned()), Duration::hours(24))
}

// =============================================================================
// Storefront
// =============================================================================

/// Storefront router plus one visitor's session cookie.
pub struct StorefrontHarness {
    pub app: Router,
    cookie: Option<String>,
}

impl StorefrontHarness {
    /// A fresh storefront with its own in-memory session store.
    #[must_use]
    pub fn new() -> Self {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_owned(),
            session_days: 7,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        };
        Self {
            app: gemvault_storefront::app(StorefrontState::new(config)),
            cookie: None,
        }
    }

    /// A second visitor on the same storefront, with no session yet.
    #[must_use]
    pub fn other_visitor(&self) -> Self {
        Self {
            app: self.app.clone(),
            cookie: None,
        }
    }

    /// Send a request as this visitor, keeping any session cookie issued.
    pub async fn send(&mut self, method: Method, uri: &str, body: Option<&Value>) -> Response<Body> {
        let request = request(method, uri, body, self.cookie.as_deref());
        let response = self.app.clone().oneshot(request).await.unwrap();
        if let Some(set_cookie) = set_cookie_for(&response, "gemvault_session") {
            self.cookie = Some(cookie_pair(&set_cookie));
        }
        response
    }

    /// POST a JSON body and decode the JSON response.
    pub async fn post_json(&mut self, uri: &str, body: &Value) -> Value {
        body_json(self.send(Method::POST, uri, Some(body)).await).await
    }

    /// POST with no body and decode the JSON response.
    pub async fn post(&mut self, uri: &str) -> Value {
        body_json(self.send(Method::POST, uri, None).await).await
    }

    /// GET /cart.
    pub async fn cart(&mut self) -> Value {
        body_json(self.send(Method::GET, "/cart", None).await).await
    }
}

impl Default for StorefrontHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// JSON body for adding a stone to the cart.
#[must_use]
pub fn stone(id: &str, price: &str) -> Value {
    serde_json::json!({
        "id": id,
        "name": format!("Sapphire {id}"),
        "unit_price": price,
        "image_ref": format!("/images/{id}.jpg"),
        "weight_label": "2.14 Carats",
        "variant_label": "Oval",
    })
}
