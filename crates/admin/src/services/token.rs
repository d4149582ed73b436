//! Signed admin session tokens.
//!
//! Tokens are HS256 JWS strings carrying [`SessionClaims`]. The signature
//! check is done by `jsonwebtoken`; expiry is checked here against the
//! caller-supplied time so tests can drive it with a manual clock.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use gemvault_core::{AdminRole, Username};

use crate::models::{CurrentAdmin, SessionClaims};

/// Token failures. The guard treats all of them the same way.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Bad signature, malformed token, unknown role, or bad subject.
    #[error("invalid session token")]
    Invalid,

    /// The token's `exp` is not after the current time.
    #[error("session token expired")]
    Expired,

    /// The token could not be signed.
    #[error("failed to sign session token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Issues and verifies admin session tokens with a server-held secret.
#[derive(Clone)]
pub struct SessionTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl fmt::Debug for SessionTokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionTokenCodec")
            .field("keys", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl SessionTokenCodec {
    /// Create a codec signing with `secret`; issued tokens live for `ttl`.
    #[must_use]
    pub fn new(secret: &SecretString, ttl: Duration) -> Self {
        let bytes = secret.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is compared against the injected clock in `verify`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
            validation,
            ttl,
        }
    }

    /// How long issued tokens remain valid.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign a token for `username`, issued at `now`.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Signing` if encoding fails.
    pub fn issue(&self, username: &Username, now: DateTime<Utc>) -> Result<String, TokenError> {
        let iat = now.timestamp();
        let claims = SessionClaims {
            sub: username.as_str().to_owned(),
            role: AdminRole::Admin,
            iat,
            exp: iat + self.ttl.num_seconds(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Signing)
    }

    /// Verify `token` and return the administrator it was issued to.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Invalid` for anything that does not decode and
    /// verify, and `TokenError::Expired` once `exp <= now`.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<CurrentAdmin, TokenError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "session token rejected");
                TokenError::Invalid
            })?;
        let claims = data.claims;

        if claims.exp <= now.timestamp() {
            return Err(TokenError::Expired);
        }

        let username = Username::parse(&claims.sub).map_err(|_| TokenError::Invalid)?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0).ok_or(TokenError::Invalid)?;

        Ok(CurrentAdmin {
            username,
            role: claims.role,
            expires_at,
        })
    }
}
