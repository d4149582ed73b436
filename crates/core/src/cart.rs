//! Shopping cart store.
//!
//! A [`Cart`] is owned by exactly one browser session. Callers hold it by
//! value (or `&mut`) and pass it to whatever needs it; there is no ambient
//! global cart. All totals are derived from the lines on every read.
//!
//! # Invariants
//!
//! - At most one [`CartLine`] per product ID.
//! - Every line has `quantity >= 1`. Setting a quantity to zero or below
//!   removes the line.
//! - Lines keep insertion order, which is also display order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// Product data supplied when adding to the cart.
///
/// Same shape as [`CartLine`] without the quantity, which the cart owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineInput {
    /// Catalog product ID (unique key within the cart).
    pub id: ProductId,
    /// Display label.
    pub name: String,
    /// Price of a single unit.
    pub unit_price: Price,
    /// Opaque reference to a displayable image.
    pub image_ref: String,
    /// Free-form weight text, e.g. "2.14 Carats".
    pub weight_label: String,
    /// Free-form variant text, e.g. the cut or shape.
    pub variant_label: String,
}

/// One product's presence in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Catalog product ID (unique key within the cart).
    pub id: ProductId,
    /// Display label.
    pub name: String,
    /// Price of a single unit.
    pub unit_price: Price,
    /// Opaque reference to a displayable image.
    pub image_ref: String,
    /// Free-form weight text.
    pub weight_label: String,
    /// Free-form variant text.
    pub variant_label: String,
    /// Number of units, always at least 1.
    pub quantity: u32,
}

impl CartLine {
    fn from_input(input: CartLineInput) -> Self {
        Self {
            id: input.id,
            name: input.name,
            unit_price: input.unit_price,
            image_ref: input.image_ref,
            weight_label: input.weight_label,
            variant_label: input.variant_label,
            quantity: 1,
        }
    }

    /// `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price.times(self.quantity)
    }
}

/// The shopping cart for one browser session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
    #[serde(default)]
    is_open: bool,
}

impl Cart {
    /// Create an empty, closed cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            is_open: false,
        }
    }

    /// Add one unit of a product.
    ///
    /// If the product is already in the cart its quantity goes up by one;
    /// otherwise a new line with quantity 1 is appended.
    pub fn add_item(&mut self, input: CartLineInput) {
        if let Some(line) = self.line_mut(&input.id) {
            line.quantity = line.quantity.saturating_add(1);
            return;
        }
        self.lines.push(CartLine::from_input(input));
    }

    /// Remove the line for `id`.
    ///
    /// Returns `false` (and changes nothing) when no such line exists.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| &line.id != id);
        self.lines.len() != before
    }

    /// Replace the quantity of the line for `id`.
    ///
    /// A quantity of zero or below removes the line. Quantities above
    /// `u32::MAX` are clamped. Returns `false` when no such line exists.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(id);
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self.line_mut(id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Present the cart surface.
    pub const fn open_cart(&mut self) {
        self.is_open = true;
    }

    /// Hide the cart surface.
    pub const fn close_cart(&mut self) {
        self.is_open = false;
    }

    /// Flip the cart surface's visibility.
    pub const fn toggle_cart(&mut self) {
        self.is_open = !self.is_open;
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up the line for `id`.
    #[must_use]
    pub fn line(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.id == id)
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of `unit_price * quantity` over all lines.
    ///
    /// With prices capped at [`Price::MAX`] each line is below 4.3e18, so the
    /// sum stays exact for any cart short of ~1.8e10 lines.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lines
            .iter()
            .try_fold(Decimal::ZERO, |total, line| {
                total.checked_add(line.line_total())
            })
            .unwrap_or(Decimal::MAX)
    }

    /// Whether the cart surface is presented.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_mut(&mut self, id: &ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| &line.id == id)
    }
}
