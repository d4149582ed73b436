//! Session guard and extractor for admin.
//!
//! Every request under `/admin` except the login page must carry a valid
//! session cookie. Anything else is redirected to the login page; the reason
//! is only logged.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::error::set_sentry_user;
use crate::middleware::cookie::read_session_token;
use crate::models::CurrentAdmin;
use crate::state::AppState;

/// Path of the login page, the only unguarded path under `/admin`.
pub const LOGIN_PATH: &str = "/admin/login";

/// Whether `path` requires an authenticated administrator.
#[must_use]
pub fn is_guarded(path: &str) -> bool {
    let under_admin = path == "/admin" || path.starts_with("/admin/");
    under_admin && path != LOGIN_PATH
}

/// Middleware that verifies the admin session cookie.
///
/// On success the [`CurrentAdmin`] is inserted into request extensions. The
/// token is never refreshed here.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if !is_guarded(request.uri().path()) {
        return next.run(request).await;
    }

    let Some(token) = read_session_token(request.headers()) else {
        tracing::debug!(path = %request.uri().path(), "no admin session cookie");
        return Redirect::to(LOGIN_PATH).into_response();
    };

    match state.tokens().verify(&token, state.clock().now()) {
        Ok(admin) => {
            set_sentry_user(admin.username.as_str());
            request.extensions_mut().insert(admin);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(error = %e, path = %request.uri().path(), "admin session rejected");
            Redirect::to(LOGIN_PATH).into_response()
        }
    }
}

/// Extractor for the administrator the guard let through.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdminAuth(admin): RequireAdminAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.username)
/// }
/// ```
pub struct RequireAdminAuth(pub CurrentAdmin);

impl<S> FromRequestParts<S> for RequireAdminAuth
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentAdmin>()
            .cloned()
            .map(Self)
            .ok_or_else(|| Redirect::to(LOGIN_PATH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guarded_paths() {
        assert!(is_guarded("/admin"));
        assert!(is_guarded("/admin/"));
        assert!(is_guarded("/admin/api/me"));
        assert!(is_guarded("/admin/logout"));
        assert!(is_guarded("/admin/login/extra"));
    }

    #[test]
    fn test_unguarded_paths() {
        assert!(!is_guarded("/admin/login"));
        assert!(!is_guarded("/health"));
        assert!(!is_guarded("/"));
        assert!(!is_guarded("/administrator"));
    }
}
