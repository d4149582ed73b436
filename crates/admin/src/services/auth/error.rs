//! Admin authentication error types.

use thiserror::Error;

use gemvault_core::UsernameError;

use crate::db::RepositoryError;
use crate::services::token::TokenError;

/// Errors that can occur during admin authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown username or wrong password. The two are never distinguished.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// New username failed validation.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    /// New password is too short.
    #[error("password must be at least {min} characters")]
    WeakPassword { min: usize },

    /// Password hashing failed.
    #[error("password hashing failed")]
    PasswordHash,

    /// Session token could not be issued.
    #[error("token error: {0}")]
    Token(#[from] TokenError),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
