//! Session-related types.

/// Session keys for storefront data.
pub mod keys {
    /// Key for the visitor's cart (`gemvault_core::Cart`).
    pub const CART: &str = "cart";
}
