//! Gemvault Admin - back-office server.
//!
//! Serves the admin panel on port 3001 by default. Sessions are HS256-signed
//! cookies checked on every `/admin` request; the only server-side record is
//! the administrator credential in `PostgreSQL`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use gemvault_admin::clock::SystemClock;
use gemvault_admin::config::AdminConfig;
use gemvault_admin::db::{self, PgCredentialStore};
use gemvault_admin::services::SessionTokenCodec;
use gemvault_admin::state::AppState;
use gemvault_admin::telemetry;

#[tokio::main]
async fn main() {
    let config = AdminConfig::from_env().expect("Failed to load configuration");
    let _sentry_guard = telemetry::init(&config);

    // Migrations are applied by `gemvault-cli migrate admin`, not here.
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");
    tracing::info!("database pool created");

    let state = AppState::new(
        Arc::new(PgCredentialStore::new(pool)),
        SessionTokenCodec::new(&config.session_secret, config.session_ttl),
        Arc::new(SystemClock),
        config.is_secure(),
    );

    let app = gemvault_admin::app(state)
        // Sentry outermost so it sees the whole request.
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");
    tracing::info!(%addr, "admin listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(telemetry::shutdown_signal())
        .await
        .expect("Server error");
}
