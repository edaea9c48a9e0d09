//! Product handlers.
//!
//! Create, update and delete run on the repository's transactional paths,
//! so every quantity movement lands in the activity ledger alongside the
//! product write.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};

use kuber_core::ProductId;

use crate::{
    db::ProductRepository,
    error::AppError,
    middleware::RequireAdminAuth,
    models::{NewProduct, Product, ProductFilter, ProductUpdate},
    state::AppState,
};

/// Build the product router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list).post(create))
        .route(
            "/api/products/{id}",
            get(get_one).put(update).delete(remove),
        )
}

/// Query parameters for the product list.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Exact category name match.
    pub category: Option<String>,
    /// Substring match on name or SKU, case-insensitive.
    pub search: Option<String>,
    /// When true, keep only products at or under their threshold.
    #[serde(default)]
    pub low_stock: bool,
}

impl From<ListQuery> for ProductFilter {
    fn from(query: ListQuery) -> Self {
        Self {
            category: query.category,
            search: query.search,
            low_stock_only: query.low_stock,
        }
    }
}

/// Deletion acknowledgement.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// Create a product. The initial quantity is ledgered as `created`.
pub async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(body): Json<NewProduct>,
) -> Result<Json<Product>, AppError> {
    let product = ProductRepository::new(state.pool())
        .create(&body, &admin.email)
        .await?;
    Ok(Json(product))
}

/// List products, optionally narrowed by category, search and low-stock.
pub async fn list(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = ProductRepository::new(state.pool())
        .list(&query.into())
        .await?;
    Ok(Json(products))
}

/// Fetch a single product.
pub async fn get_one(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>, AppError> {
    let product = ProductRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;
    Ok(Json(product))
}

/// Apply a partial update. A quantity change is ledgered with its signed
/// delta; omitted fields keep their stored values.
pub async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(body): Json<ProductUpdate>,
) -> Result<Json<Product>, AppError> {
    let product = ProductRepository::new(state.pool())
        .update(id, &body, &admin.email)
        .await
        .map_err(|e| AppError::from_repo(e, "Product"))?;
    Ok(Json(product))
}

/// Delete a product, ledgered as `deleted` with a zero delta.
pub async fn remove(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<DeleteResponse>, AppError> {
    ProductRepository::new(state.pool())
        .delete(id, &admin.email)
        .await
        .map_err(|e| AppError::from_repo(e, "Product"))?;

    Ok(Json(DeleteResponse {
        message: "Product deleted successfully".to_string(),
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_defaults() {
        let query: ListQuery = serde_json::from_str("{}").unwrap();
        let filter: ProductFilter = query.into();
        assert!(filter.category.is_none());
        assert!(filter.search.is_none());
        assert!(!filter.low_stock_only);
    }

    #[test]
    fn test_list_query_maps_low_stock() {
        let query: ListQuery =
            serde_json::from_str(r#"{"category":"Jewellery","low_stock":true}"#).unwrap();
        let filter: ProductFilter = query.into();
        assert_eq!(filter.category.as_deref(), Some("Jewellery"));
        assert!(filter.low_stock_only);
    }
}
