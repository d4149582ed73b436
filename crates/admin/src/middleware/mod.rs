//! HTTP middleware for admin.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, added in `main`)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (tag span, Sentry scope and response)
//! 4. Session guard (verify the signed cookie under `/admin`)

pub mod auth;
pub mod cookie;
pub mod request_id;

pub use auth::{LOGIN_PATH, RequireAdminAuth, is_guarded, require_admin};
pub use cookie::{
    ADMIN_SESSION_COOKIE, read_session_token, removal_cookie, session_cookie, set_cookie_value,
};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
