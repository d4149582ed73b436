//! Cart route handlers.
//!
//! The cart is loaded from the visitor's session, changed by exactly one
//! handler, and written back. Every mutating endpoint answers with the
//! resulting [`CartView`].

use askama::Template;
use askama_web::WebTemplate;
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use gemvault_core::{Cart, CartLine, CartLineInput, ProductId};

use crate::error::AppError;
use crate::models::session_keys;

/// Cart as returned to the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub total_items: u64,
    pub total_price: Decimal,
    pub is_open: bool,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().to_vec(),
            total_items: cart.total_items(),
            total_price: cart.total_price(),
            is_open: cart.is_open(),
        }
    }
}

/// Remove-from-cart request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub id: ProductId,
}

/// Update-quantity request body. Zero or negative removes the line.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub id: ProductId,
    pub quantity: i64,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the visitor's cart. A missing or unreadable record yields an empty
/// cart.
pub(crate) async fn load_cart(session: &Session) -> Cart {
    match session.get::<Cart>(session_keys::CART).await {
        Ok(cart) => cart.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "discarding unreadable cart in session");
            Cart::new()
        }
    }
}

/// Write the cart back to the session.
async fn save_cart(session: &Session, cart: &Cart) -> Result<(), AppError> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// Load, change, save, and render the cart.
async fn with_cart(
    session: &Session,
    change: impl FnOnce(&mut Cart),
) -> Result<Json<CartView>, AppError> {
    let mut cart = load_cart(session).await;
    change(&mut cart);
    // Render first so nothing is persisted unless the response can be built.
    let view = CartView::from(&cart);
    save_cart(session, &cart).await?;
    Ok(Json(view))
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /cart
#[instrument(skip(session))]
pub async fn show(session: Session) -> Json<CartView> {
    Json(CartView::from(&load_cart(&session).await))
}

/// POST /cart/add
///
/// Adds one unit; a product already in the cart has its quantity bumped.
#[instrument(skip(session, input), fields(product_id = %input.id))]
pub async fn add(
    session: Session,
    Json(input): Json<CartLineInput>,
) -> Result<Json<CartView>, AppError> {
    with_cart(&session, |cart| cart.add_item(input)).await
}

/// POST /cart/remove
#[instrument(skip(session, request), fields(product_id = %request.id))]
pub async fn remove(
    session: Session,
    Json(request): Json<RemoveFromCartRequest>,
) -> Result<Json<CartView>, AppError> {
    with_cart(&session, |cart| {
        if !cart.remove_item(&request.id) {
            tracing::debug!("remove for product not in cart");
        }
    })
    .await
}

/// POST /cart/update
#[instrument(skip(session, request), fields(product_id = %request.id, quantity = request.quantity))]
pub async fn update(
    session: Session,
    Json(request): Json<UpdateCartRequest>,
) -> Result<Json<CartView>, AppError> {
    with_cart(&session, |cart| {
        if !cart.update_quantity(&request.id, request.quantity) {
            tracing::debug!("update for product not in cart");
        }
    })
    .await
}

/// POST /cart/open
pub async fn open(session: Session) -> Result<Json<CartView>, AppError> {
    with_cart(&session, Cart::open_cart).await
}

/// POST /cart/close
pub async fn close(session: Session) -> Result<Json<CartView>, AppError> {
    with_cart(&session, Cart::close_cart).await
}

/// POST /cart/toggle
pub async fn toggle(session: Session) -> Result<Json<CartView>, AppError> {
    with_cart(&session, Cart::toggle_cart).await
}

/// GET /cart/count
///
/// Navbar badge fragment.
pub async fn count(session: Session) -> CartCountTemplate {
    CartCountTemplate {
        count: load_cart(&session).await.total_items(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use gemvault_core::Price;
    use serde_json::json;

    use super::*;

    fn input(id: &str, cents: i64) -> CartLineInput {
        CartLineInput {
            id: ProductId::new(id),
            name: format!("Stone {id}"),
            unit_price: Price::new(Decimal::new(cents, 2)).unwrap(),
            image_ref: format!("/img/{id}.jpg"),
            weight_label: "1.5 Carats".to_string(),
            variant_label: "Oval".to_string(),
        }
    }

    #[test]
    fn test_cart_view_reflects_cart() {
        let mut cart = Cart::new();
        cart.add_item(input("7", 12_500));
        cart.add_item(input("7", 12_500));
        cart.add_item(input("9", 5_000));
        cart.open_cart();

        let view = CartView::from(&cart);
        assert_eq!(view.lines.len(), 2);
        assert_eq!(view.total_items, 3);
        assert_eq!(view.total_price, Decimal::new(30_000, 2));
        assert!(view.is_open);
    }

    #[test]
    fn test_cart_view_json_shape() {
        let mut cart = Cart::new();
        cart.add_item(input("7", 12_500));

        let value = serde_json::to_value(CartView::from(&cart)).unwrap();
        assert_eq!(value["total_items"], json!(1));
        assert_eq!(value["total_price"], json!("125.00"));
        assert_eq!(value["is_open"], json!(false));
        assert_eq!(value["lines"][0]["id"], json!("7"));
        assert_eq!(value["lines"][0]["quantity"], json!(1));
    }

    #[test]
    fn test_update_request_accepts_negative_quantity() {
        let request: UpdateCartRequest =
            serde_json::from_value(json!({ "id": "7", "quantity": -3 })).unwrap();
        assert_eq!(request.quantity, -3);
    }

    #[test]
    fn test_count_badge_renders() {
        let html = CartCountTemplate { count: 4 }.render().unwrap();
        assert!(html.contains('4'));
    }
}
