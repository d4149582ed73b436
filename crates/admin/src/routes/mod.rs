//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness
//! GET  /health/ready                - Readiness (credential store reachable)
//!
//! # Auth
//! GET  /admin/login                 - Login page (unguarded)
//! POST /admin/login                 - Username/password login, sets session cookie
//! POST /admin/logout                - Clear session cookie
//!
//! # Dashboard
//! GET  /admin                       - Dashboard
//! GET  /admin/api/me                - Current administrator (JSON)
//!
//! # Settings
//! POST /admin/settings/credentials  - Replace username and password
//! ```

use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;

use crate::state::AppState;

pub mod auth;
pub mod dashboard;
pub mod settings;

/// Body returned by JSON endpoints that only report success.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    const fn ok() -> Self {
        Self { success: true }
    }
}

/// Build the full admin router (without middleware).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(settings::router())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the credential store is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.credentials().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
