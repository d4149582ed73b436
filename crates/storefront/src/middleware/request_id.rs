//! Request correlation ids.
//!
//! An id set by the CDN or load balancer in `x-request-id` is kept; anything
//! else gets a fresh UUID v4. Cart changes logged inside the request carry
//! the id through the enclosing `http_request` span.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream id accepted as-is.
const MAX_UPSTREAM_LEN: usize = 128;

/// Pick the id for a request from its headers.
fn resolve_request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty() && id.len() <= MAX_UPSTREAM_LEN)
        .map_or_else(|| Uuid::new_v4().to_string(), str::to_owned)
}

/// Tag the span, Sentry scope and response with the request's id.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = resolve_request_id(request.headers());

    Span::current().record("request_id", request_id.as_str());
    sentry::configure_scope(|scope| scope.set_tag("request_id", &request_id));

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_upstream_id_is_kept() {
        assert_eq!(resolve_request_id(&headers("cdn-42")), "cdn-42");
        assert_eq!(resolve_request_id(&headers("  cdn-42 ")), "cdn-42");
    }

    #[test]
    fn test_missing_blank_or_oversized_id_is_replaced() {
        for headers in [
            HeaderMap::new(),
            headers("   "),
            headers(&"x".repeat(MAX_UPSTREAM_LEN + 1)),
        ] {
            let id = resolve_request_id(&headers);
            assert!(Uuid::parse_str(&id).is_ok(), "{id}");
        }
    }
}
