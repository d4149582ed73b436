//! Gemvault Storefront - public gemstone shop.
//!
//! Serves the storefront on port 3000 by default. Each visitor's cart is
//! held in their in-memory session record, so carts do not survive a
//! restart.

#![cfg_attr(not(test), forbid(unsafe_code))]

use gemvault_storefront::config::StorefrontConfig;
use gemvault_storefront::state::AppState;
use gemvault_storefront::telemetry;

#[tokio::main]
async fn main() {
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");
    let _sentry_guard = telemetry::init(&config);

    let addr = config.socket_addr();
    let app = gemvault_storefront::app(AppState::new(config))
        // Sentry outermost so it sees the whole request.
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");
    tracing::info!(%addr, "storefront listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(telemetry::shutdown_signal())
        .await
        .expect("Server error");
}
