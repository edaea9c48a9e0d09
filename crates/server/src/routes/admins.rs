//! Admin listing handler.

use axum::{Json, Router, extract::State, routing::get};

use crate::{
    db::AdminRepository, error::AppError, middleware::RequireAdminAuth, models::Admin,
    state::AppState,
};

/// Build the admins router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/admins", get(list))
}

/// List all admins, newest first. The serialized shape carries no
/// credential material.
pub async fn list(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Admin>>, AppError> {
    let admins = AdminRepository::new(state.pool()).list_all().await?;
    Ok(Json(admins))
}
