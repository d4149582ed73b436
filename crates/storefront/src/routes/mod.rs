//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health             - Liveness
//! GET  /health/ready       - Readiness (no external dependencies)
//!
//! # Cart (JSON `CartView` unless noted)
//! GET  /cart               - Current cart
//! POST /cart/add           - Add one unit of a product
//! POST /cart/remove        - Remove a product's line
//! POST /cart/update        - Set a line's quantity (<= 0 removes)
//! POST /cart/open          - Show the cart drawer
//! POST /cart/close         - Hide the cart drawer
//! POST /cart/toggle        - Flip the cart drawer
//! GET  /cart/count         - Navbar badge fragment (HTML)
//!
//! # Checkout
//! GET  /checkout/summary   - Lines with totals; 409 when empty
//! ```

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub mod cart;
pub mod checkout;

/// Build the storefront router (without middleware).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(health))
        .route("/cart", get(cart::show))
        .route("/cart/add", post(cart::add))
        .route("/cart/remove", post(cart::remove))
        .route("/cart/update", post(cart::update))
        .route("/cart/open", post(cart::open))
        .route("/cart/close", post(cart::close))
        .route("/cart/toggle", post(cart::toggle))
        .route("/cart/count", get(cart::count))
        .route("/checkout/summary", get(checkout::summary))
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
