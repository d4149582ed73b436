//! Session-related types for admin authentication.
//!
//! The admin session lives entirely in a signed token carried by a cookie;
//! nothing is stored server-side.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gemvault_core::{AdminRole, Username};

/// Claims carried in an admin session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the administrator's username.
    pub sub: String,
    /// Role granted by the token. Only `admin` is ever issued.
    pub role: AdminRole,
    /// Issued-at (Unix timestamp, seconds).
    pub iat: i64,
    /// Expiry (Unix timestamp, seconds).
    pub exp: i64,
}

/// The administrator a verified token belongs to.
///
/// Inserted into request extensions by the session guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentAdmin {
    /// Administrator's username.
    pub username: Username,
    /// Role from the token.
    pub role: AdminRole,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}
