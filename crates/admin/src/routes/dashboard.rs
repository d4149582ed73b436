//! Dashboard route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Json, Router, routing::get};
use tracing::instrument;

use crate::middleware::RequireAdminAuth;
use crate::models::CurrentAdmin;
use crate::state::AppState;

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub username: String,
    pub role: String,
    pub expires_at: String,
}

impl From<&CurrentAdmin> for DashboardTemplate {
    fn from(admin: &CurrentAdmin) -> Self {
        Self {
            username: admin.username.to_string(),
            role: admin.role.to_string(),
            expires_at: admin.expires_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        }
    }
}

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin", get(dashboard))
        .route("/admin/api/me", get(me))
}

/// GET /admin
#[instrument(skip_all, fields(username = %admin.username))]
async fn dashboard(RequireAdminAuth(admin): RequireAdminAuth) -> DashboardTemplate {
    DashboardTemplate::from(&admin)
}

/// GET /admin/api/me
async fn me(RequireAdminAuth(admin): RequireAdminAuth) -> Json<CurrentAdmin> {
    Json(admin)
}
