//! Application state shared across handlers.

use std::sync::Arc;

use crate::clock::Clock;
use crate::db::CredentialStore;
use crate::services::auth::AuthService;
use crate::services::token::SessionTokenCodec;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; everything inside is read-only except the
/// credential store, which serialises its own writes.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    credentials: Arc<dyn CredentialStore>,
    tokens: SessionTokenCodec,
    clock: Arc<dyn Clock>,
    secure_cookies: bool,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `credentials` - Administrator credential store
    /// * `tokens` - Session token codec holding the signing secret
    /// * `clock` - Time source for issuing and checking tokens
    /// * `secure_cookies` - Whether to mark the session cookie `Secure`
    #[must_use]
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        tokens: SessionTokenCodec,
        clock: Arc<dyn Clock>,
        secure_cookies: bool,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                credentials,
                tokens,
                clock,
                secure_cookies,
            }),
        }
    }

    /// Get the credential store.
    #[must_use]
    pub fn credentials(&self) -> &dyn CredentialStore {
        self.inner.credentials.as_ref()
    }

    /// Get the session token codec.
    #[must_use]
    pub fn tokens(&self) -> &SessionTokenCodec {
        &self.inner.tokens
    }

    /// Get the clock.
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.inner.clock.as_ref()
    }

    /// Whether session cookies carry the `Secure` attribute.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.inner.secure_cookies
    }

    /// Build an authentication service over this state.
    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self.credentials(), self.tokens(), self.clock())
    }
}
