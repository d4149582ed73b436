//! Admin settings routes.

use axum::{
    Json, Router,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::AppError;
use crate::middleware::{RequireAdminAuth, removal_cookie, set_cookie_value};
use crate::state::AppState;

use super::SuccessResponse;

/// Request to replace the administrator credential.
#[derive(Deserialize)]
pub struct UpdateCredentialsRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for UpdateCredentialsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateCredentialsRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Build the settings router.
pub fn router() -> Router<AppState> {
    Router::new().route("/admin/settings/credentials", post(update_credentials))
}

/// Replace the administrator's username and password.
///
/// POST /admin/settings/credentials
///
/// The caller's cookie is cleared so they sign in again with the new
/// credential. Tokens held elsewhere stay valid until they expire.
///
/// # Errors
///
/// Returns 400 for an invalid username or a weak password.
#[instrument(skip(state, admin, request), fields(admin = %admin.username, new_username = %request.username))]
async fn update_credentials(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Json(request): Json<UpdateCredentialsRequest>,
) -> Result<Response, AppError> {
    state
        .auth()
        .update_credentials(&request.username, &request.password)
        .await?;

    let set_cookie = set_cookie_value(&removal_cookie(state.secure_cookies()))
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok((
        [(header::SET_COOKIE, set_cookie)],
        Json(SuccessResponse::ok()),
    )
        .into_response())
}
