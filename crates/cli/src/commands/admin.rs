//! Admin credential management.
//!
//! # Usage
//!
//! ```bash
//! GEMVAULT_ADMIN_PASSWORD='...' gemvault-cli admin set-credentials -u owner
//! ```
//!
//! The password is read from the environment so it never appears in shell
//! history or the process list.
//!
//! # Environment Variables
//!
//! - `ADMIN_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string
//! - `GEMVAULT_ADMIN_PASSWORD` - The new password

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use gemvault_admin::db::{PgCredentialStore, create_pool};
use gemvault_admin::services::{AuthError, set_credentials as store_credentials};

use super::admin_database_url;

/// Environment variable holding the new password.
pub const PASSWORD_ENV: &str = "GEMVAULT_ADMIN_PASSWORD";

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Credential rejected or could not be stored.
    #[error("{0}")]
    Auth(#[from] AuthError),
}

/// Create or replace the administrator credential.
///
/// # Errors
///
/// Returns `AdminError` if configuration is missing, the database cannot be
/// reached, or the credential is rejected.
pub async fn set_credentials(username: &str) -> Result<(), AdminError> {
    let _ = dotenvy::dotenv();

    let database_url =
        admin_database_url().ok_or(AdminError::MissingEnvVar("ADMIN_DATABASE_URL"))?;
    let password = std::env::var(PASSWORD_ENV)
        .ok()
        .filter(|p| !p.is_empty())
        .map(SecretString::from)
        .ok_or(AdminError::MissingEnvVar(PASSWORD_ENV))?;

    let pool = create_pool(&database_url).await?;
    let store = PgCredentialStore::new(pool);

    let credential = store_credentials(&store, username, password.expose_secret()).await?;
    tracing::info!(
        username = %credential.username,
        updated_at = %credential.updated_at,
        "Admin credential saved"
    );
    Ok(())
}
