//! Gemvault Core - Shared domain library.
//!
//! This crate provides the types and in-memory logic used across all Gemvault
//! components:
//! - `storefront` - Public gemstone shop (cart surface)
//! - `admin` - Back office behind the admin session guard
//! - `cli` - Command-line tools for migrations and credential management
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, usernames and roles
//! - [`cart`] - The shopping cart store with quantity/merge rules and totals
//! - [`catalog`] - Catalog list transforms (slugs, filtering, sorting)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod types;

pub use cart::{Cart, CartLine, CartLineInput};
pub use types::*;
