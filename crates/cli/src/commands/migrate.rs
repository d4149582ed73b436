//! Database migration commands.
//!
//! # Usage
//!
//! ```bash
//! gemvault-cli migrate admin
//! ```
//!
//! # Environment Variables
//!
//! - `ADMIN_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string
//!
//! Admin migrations live in `crates/admin/migrations/` and are embedded in
//! the binary at build time.

use thiserror::Error;

use gemvault_admin::db::create_pool;

use super::admin_database_url;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run admin database migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the database URL is missing, the database
/// cannot be reached, or a migration fails.
pub async fn admin() -> Result<(), MigrationError> {
    let _ = dotenvy::dotenv();

    let database_url =
        admin_database_url().ok_or(MigrationError::MissingEnvVar("ADMIN_DATABASE_URL"))?;

    tracing::info!("Connecting to admin database...");
    let pool = create_pool(&database_url).await?;

    tracing::info!("Running admin migrations...");
    sqlx::migrate!("../admin/migrations").run(&pool).await?;

    tracing::info!("Admin migrations complete");
    Ok(())
}
