//! The admin session cookie.
//!
//! The cookie value is the signed session token itself. It is `HttpOnly`,
//! `SameSite=Strict`, scoped to `/`, and `Secure` whenever the admin is
//! served over HTTPS.

use axum::http::{HeaderMap, HeaderValue, header, header::InvalidHeaderValue};
use tower_sessions::cookie::{Cookie, SameSite, time::Duration};

/// Admin session cookie name.
pub const ADMIN_SESSION_COOKIE: &str = "gemvault_admin_session";

/// Cookie carrying a freshly issued session token.
#[must_use]
pub fn session_cookie(token: String, max_age: chrono::Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((ADMIN_SESSION_COOKIE, token))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(Duration::seconds(max_age.num_seconds()))
        .build()
}

/// Cookie that makes the browser drop the session cookie.
#[must_use]
pub fn removal_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((ADMIN_SESSION_COOKIE, ""))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}

/// Encode a cookie as a `Set-Cookie` header value.
///
/// # Errors
///
/// Returns `InvalidHeaderValue` if the cookie contains bytes not allowed in
/// a header.
pub fn set_cookie_value(cookie: &Cookie<'_>) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&cookie.to_string())
}

/// The session token from the request's `Cookie` headers, if any.
#[must_use]
pub fn read_session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == ADMIN_SESSION_COOKIE && !cookie.value().is_empty())
        .map(|cookie| cookie.value().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("tok".to_string(), chrono::Duration::hours(24), true);
        let rendered = cookie.to_string();

        assert!(rendered.starts_with("gemvault_admin_session=tok"));
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("SameSite=Strict"));
        assert!(rendered.contains("Secure"));
        assert!(rendered.contains("Path=/"));
        assert!(rendered.contains("Max-Age=86400"));
    }

    #[test]
    fn test_session_cookie_not_secure_over_http() {
        let cookie = session_cookie("tok".to_string(), chrono::Duration::hours(24), false);
        assert!(!cookie.to_string().contains("Secure"));
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        let rendered = removal_cookie(false).to_string();
        assert!(rendered.starts_with("gemvault_admin_session=;"));
        assert!(rendered.contains("Max-Age=0"));
    }

    #[test]
    fn test_read_session_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("gemvault_session=abc; gemvault_admin_session=a.b.c"),
        );
        assert_eq!(read_session_token(&headers).as_deref(), Some("a.b.c"));
    }

    #[test]
    fn test_read_session_token_absent_or_empty() {
        let mut headers = HeaderMap::new();
        assert!(read_session_token(&headers).is_none());

        headers.insert(header::COOKIE, HeaderValue::from_static("gemvault_admin_session="));
        assert!(read_session_token(&headers).is_none());
    }
}
