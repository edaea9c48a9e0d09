//! Category handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get},
};
use serde::Serialize;

use kuber_core::CategoryId;

use crate::{
    db::CategoryRepository,
    error::AppError,
    middleware::RequireAdminAuth,
    models::{CategoryWithCount, NewCategory},
    state::AppState,
};

/// Build the category router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/categories", get(list).post(create))
        .route("/api/categories/{id}", delete(remove))
}

/// Deletion acknowledgement.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// Create a category. Duplicate names are allowed.
pub async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(body): Json<NewCategory>,
) -> Result<Json<CategoryWithCount>, AppError> {
    let category = CategoryRepository::new(state.pool()).create(&body).await?;

    // A fresh category has no products yet, so the count is known.
    Ok(Json(CategoryWithCount {
        category,
        product_count: 0,
    }))
}

/// List all categories with product counts recomputed per request.
pub async fn list(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryWithCount>>, AppError> {
    let categories = CategoryRepository::new(state.pool())
        .list_with_counts()
        .await?;
    Ok(Json(categories))
}

/// Delete a category. Products keep their category string.
pub async fn remove(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<Json<DeleteResponse>, AppError> {
    CategoryRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(|e| AppError::from_repo(e, "Category"))?;

    Ok(Json(DeleteResponse {
        message: "Category deleted successfully".to_string(),
    }))
}
