//! Admin authentication service.
//!
//! Username/password login against the single administrator credential,
//! issuing a signed session token on success.

mod error;

pub use error::AuthError;

use std::sync::LazyLock;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use gemvault_core::Username;

use crate::clock::Clock;
use crate::db::CredentialStore;
use crate::models::AdminCredential;
use crate::services::token::SessionTokenCodec;

/// Minimum password length for the administrator.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Hash verified when the username is unknown, so both failure paths cost
/// one Argon2 verification.
static DUMMY_HASH: LazyLock<String> =
    LazyLock::new(|| hash_password("gemvault-dummy-password").unwrap_or_default());

/// Admin authentication service.
pub struct AuthService<'a> {
    store: &'a dyn CredentialStore,
    tokens: &'a SessionTokenCodec,
    clock: &'a dyn Clock,
}

impl<'a> AuthService<'a> {
    /// Create a new admin authentication service.
    #[must_use]
    pub const fn new(
        store: &'a dyn CredentialStore,
        tokens: &'a SessionTokenCodec,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            store,
            tokens,
            clock,
        }
    }

    /// Check `username`/`password` and issue a session token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown username or a
    /// wrong password, without saying which. Store and hashing failures are
    /// returned as-is.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let credential = match Username::parse(username) {
            Ok(username) => self.store.find_by_username(&username).await?,
            Err(_) => None,
        };

        let hash = credential
            .as_ref()
            .map_or_else(|| DUMMY_HASH.clone(), |c| c.password_hash.clone());
        let verified = verify_password_blocking(password.to_owned(), hash).await?;

        let Some(credential) = credential else {
            return Err(AuthError::InvalidCredentials);
        };
        if !verified {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(&credential.username, self.clock.now())?;
        tracing::info!(username = %credential.username, "admin logged in");
        Ok(token)
    }

    /// Replace the administrator's username and password.
    ///
    /// # Errors
    ///
    /// See [`set_credentials`].
    pub async fn update_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AdminCredential, AuthError> {
        set_credentials(self.store, username, password).await
    }
}

/// Validate, hash and store a new administrator credential.
///
/// # Errors
///
/// Returns `AuthError::InvalidUsername` or `AuthError::WeakPassword` when the
/// input is rejected, `AuthError::PasswordHash` if hashing fails, and
/// `AuthError::Repository` if the store write fails.
pub async fn set_credentials(
    store: &dyn CredentialStore,
    username: &str,
    password: &str,
) -> Result<AdminCredential, AuthError> {
    let username = Username::parse(username)?;
    validate_password(password)?;

    let password = password.to_owned();
    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|_| AuthError::PasswordHash)??;

    let credential = store.replace(&username, &hash).await?;
    tracing::info!(username = %credential.username, "admin credentials updated");
    Ok(credential)
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash. A hash that does not parse never matches.
fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
}

async fn verify_password_blocking(password: String, hash: String) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|_| AuthError::PasswordHash)
}
