//! Administrator credential store.
//!
//! The back office has exactly one administrator record. The guard only ever
//! reads it (at login); the settings screen and the CLI overwrite it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tokio::sync::RwLock;

use gemvault_core::{AdminUserId, Username};

use super::RepositoryError;
use crate::models::AdminCredential;

/// Lookup and replacement of the administrator credential.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find the credential record for `username`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backing store fails.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<AdminCredential>, RepositoryError>;

    /// Overwrite the administrator's username and password hash, creating the
    /// record if none exists yet.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backing store fails.
    async fn replace(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<AdminCredential, RepositoryError>;

    /// Check that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backing store cannot be reached.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

// =============================================================================
// PostgreSQL
// =============================================================================

/// Internal row type for `PostgreSQL` credential queries.
#[derive(Debug, sqlx::FromRow)]
struct AdminCredentialRow {
    id: AdminUserId,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AdminCredentialRow> for AdminCredential {
    type Error = RepositoryError;

    fn try_from(row: AdminCredentialRow) -> Result<Self, Self::Error> {
        let username = Username::parse(&row.username).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid username in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            username,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// `PostgreSQL`-backed credential store (`admin.admin_credential`).
#[derive(Debug, Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    /// Create a store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<AdminCredential>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminCredentialRow>(
            r"
            SELECT id, username, password_hash, created_at, updated_at
            FROM admin.admin_credential
            WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn replace(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<AdminCredential, RepositoryError> {
        // `singleton` is a constant-true unique column, so this upsert always
        // targets the one administrator row.
        let row = sqlx::query_as::<_, AdminCredentialRow>(
            r"
            INSERT INTO admin.admin_credential (singleton, username, password_hash)
            VALUES (TRUE, $1, $2)
            ON CONFLICT (singleton) DO UPDATE
                SET username = EXCLUDED.username,
                    password_hash = EXCLUDED.password_hash,
                    updated_at = NOW()
            RETURNING id, username, password_hash, created_at, updated_at
            ",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RepositoryError::Conflict(format!("username already taken: {username}"))
            }
            other => RepositoryError::Database(other),
        })?;

        row.try_into()
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

// =============================================================================
// In-memory
// =============================================================================

/// Process-local credential store.
///
/// Used by tests and local demos where no database is available.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    record: RwLock<Option<AdminCredential>>,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<AdminCredential>, RepositoryError> {
        let record = self.record.read().await;
        Ok(record
            .as_ref()
            .filter(|credential| &credential.username == username)
            .cloned())
    }

    async fn replace(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<AdminCredential, RepositoryError> {
        let now = Utc::now();
        let mut record = self.record.write().await;

        let credential = match record.take() {
            Some(existing) => AdminCredential {
                username: username.clone(),
                password_hash: password_hash.to_owned(),
                updated_at: now,
                ..existing
            },
            None => AdminCredential {
                id: AdminUserId::new(1),
                username: username.clone(),
                password_hash: password_hash.to_owned(),
                created_at: now,
                updated_at: now,
            },
        };

        *record = Some(credential.clone());
        Ok(credential)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
