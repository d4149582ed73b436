//! Checkout summary.
//!
//! Read-only view of the cart with per-line totals, used by the checkout
//! page before payment is handed off.

use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use gemvault_core::{Cart, CartLine, Price, ProductId};

use crate::error::AppError;
use crate::routes::cart::load_cart;

/// One line of the checkout summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    pub id: ProductId,
    pub name: String,
    pub image_ref: String,
    pub weight_label: String,
    pub variant_label: String,
    pub unit_price: Price,
    pub quantity: u32,
    pub line_total: Decimal,
}

impl From<&CartLine> for SummaryLine {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.clone(),
            name: line.name.clone(),
            image_ref: line.image_ref.clone(),
            weight_label: line.weight_label.clone(),
            variant_label: line.variant_label.clone(),
            unit_price: line.unit_price,
            quantity: line.quantity,
            line_total: line.line_total(),
        }
    }
}

/// Checkout summary body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutSummary {
    pub lines: Vec<SummaryLine>,
    pub total_items: u64,
    pub total_price: Decimal,
}

impl CheckoutSummary {
    /// Summarise `cart`, or `None` when there is nothing to check out.
    #[must_use]
    pub fn from_cart(cart: &Cart) -> Option<Self> {
        if cart.is_empty() {
            return None;
        }
        Some(Self {
            lines: cart.lines().iter().map(SummaryLine::from).collect(),
            total_items: cart.total_items(),
            total_price: cart.total_price(),
        })
    }
}

/// GET /checkout/summary
///
/// # Errors
///
/// Returns 409 when the cart is empty.
#[instrument(skip(session))]
pub async fn summary(session: Session) -> Result<Json<CheckoutSummary>, AppError> {
    let cart = load_cart(&session).await;
    CheckoutSummary::from_cart(&cart)
        .map(Json)
        .ok_or_else(|| AppError::Conflict("Cart is empty".to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use gemvault_core::CartLineInput;

    use super::*;

    fn input(id: &str, dollars: i64) -> CartLineInput {
        CartLineInput {
            id: ProductId::new(id),
            name: format!("Stone {id}"),
            unit_price: Price::new(Decimal::new(dollars, 0)).unwrap(),
            image_ref: String::new(),
            weight_label: "2 Carats".to_string(),
            variant_label: "Cushion".to_string(),
        }
    }

    #[test]
    fn test_empty_cart_has_no_summary() {
        assert!(CheckoutSummary::from_cart(&Cart::new()).is_none());
    }

    #[test]
    fn test_summary_line_totals() {
        let mut cart = Cart::new();
        cart.add_item(input("a", 100));
        cart.add_item(input("b", 250));
        cart.update_quantity(&ProductId::new("a"), 3);

        let summary = CheckoutSummary::from_cart(&cart).unwrap();
        assert_eq!(summary.lines[0].line_total, Decimal::new(300, 0));
        assert_eq!(summary.lines[1].line_total, Decimal::new(250, 0));
        assert_eq!(summary.total_items, 4);
        assert_eq!(summary.total_price, Decimal::new(550, 0));
    }
}
