//! Authentication route handlers for admin.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json, Router,
    extract::State,
    http::header,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::AppError;
use crate::middleware::{LOGIN_PATH, removal_cookie, session_cookie, set_cookie_value};
use crate::state::AppState;

use super::SuccessResponse;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginPageTemplate;

/// Login request body.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(LOGIN_PATH, get(login_page).post(login))
        .route("/admin/logout", post(logout))
}

/// Render the login page.
///
/// GET /admin/login
async fn login_page() -> LoginPageTemplate {
    LoginPageTemplate
}

/// Check credentials and set the session cookie.
///
/// POST /admin/login
///
/// # Errors
///
/// Returns 401 for a bad username or password (no cookie is set) and 500
/// if the credential store or hashing fails.
#[instrument(skip(state, request), fields(username = %request.username))]
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, AppError> {
    let token = state.auth().login(&request.username, &request.password).await?;

    let cookie = session_cookie(token, state.tokens().ttl(), state.secure_cookies());
    let set_cookie = set_cookie_value(&cookie).map_err(|e| AppError::Internal(e.to_string()))?;

    Ok((
        [(header::SET_COOKIE, set_cookie)],
        Json(SuccessResponse::ok()),
    )
        .into_response())
}

/// Clear the session cookie and go back to the login page.
///
/// POST /admin/logout
async fn logout(State(state): State<AppState>) -> Result<Response, AppError> {
    let set_cookie = set_cookie_value(&removal_cookie(state.secure_cookies()))
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(([(header::SET_COOKIE, set_cookie)], Redirect::to(LOGIN_PATH)).into_response())
}
