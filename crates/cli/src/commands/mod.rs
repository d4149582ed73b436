//! CLI subcommand implementations.

pub mod admin;
pub mod migrate;

use secrecy::SecretString;

/// Read the admin database URL, falling back to `DATABASE_URL`.
pub(crate) fn admin_database_url() -> Option<SecretString> {
    std::env::var("ADMIN_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
        .filter(|url| !url.is_empty())
        .map(SecretString::from)
}
