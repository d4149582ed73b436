//! Administrator credential record.

use chrono::{DateTime, Utc};

use gemvault_core::{AdminUserId, Username};

/// Stored login credential for the administrator (domain type).
#[derive(Clone)]
pub struct AdminCredential {
    /// Database ID of the record.
    pub id: AdminUserId,
    /// Login name (unique).
    pub username: Username,
    /// PHC-formatted salted password hash.
    pub password_hash: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the username or password last changed.
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredential")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}
