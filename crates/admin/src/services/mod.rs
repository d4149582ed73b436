//! Business logic services for admin.
//!
//! - `auth` - username/password login and credential updates
//! - `token` - signing and verifying session tokens

pub mod auth;
pub mod token;

pub use auth::{AuthError, AuthService, MIN_PASSWORD_LENGTH, set_credentials};
pub use token::{SessionTokenCodec, TokenError};
