//! Statistics and report handlers.
//!
//! Everything here is derived fresh from live data per request. The
//! low-stock figures all flow through the one shared predicate, so the
//! dashboard stat, the low-stock report and the filtered product list can
//! never disagree.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    db::{ActivityLedger, CategoryRepository, ProductRepository},
    error::AppError,
    middleware::RequireAdminAuth,
    models::{ActivityLogEntry, CategoryWithCount, Product},
    services::stats,
    state::AppState,
};

/// Ledger entries returned when no explicit limit is given.
const DEFAULT_ACTIVITY_LIMIT: i64 = 100;
/// Recent ledger entries embedded in the stats payload.
const STATS_ACTIVITY_LIMIT: i64 = 10;

/// Build the reports router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/stats", get(dashboard_stats))
        .route("/api/reports/low-stock", get(low_stock_report))
        .route("/api/reports/activity-logs", get(activity_logs))
        .route("/api/reports/inventory", get(inventory_report))
}

/// Dashboard statistics payload.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_products: usize,
    pub total_stock_value: Decimal,
    pub low_stock_items: usize,
    pub total_categories: i64,
    pub recent_activities: Vec<ActivityLogEntry>,
}

/// Query parameters for the activity log report.
#[derive(Debug, Deserialize)]
pub struct ActivityLogQuery {
    pub limit: Option<i64>,
}

/// Full inventory snapshot payload.
#[derive(Debug, Serialize)]
pub struct InventoryReport {
    pub products: Vec<Product>,
    pub categories: Vec<CategoryWithCount>,
    pub total_value: Decimal,
    pub generated_at: DateTime<Utc>,
}

/// Aggregated statistics for the dashboard.
pub async fn dashboard_stats(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, AppError> {
    let products = ProductRepository::new(state.pool()).list_all().await?;
    let total_categories = CategoryRepository::new(state.pool()).count().await?;
    let recent_activities = ActivityLedger::new(state.pool())
        .list(STATS_ACTIVITY_LIMIT)
        .await?;

    Ok(Json(StatsResponse {
        total_products: products.len(),
        total_stock_value: stats::total_stock_value(&products),
        low_stock_items: stats::low_stock(&products).len(),
        total_categories,
        recent_activities,
    }))
}

/// Products at or under their low-stock threshold.
pub async fn low_stock_report(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, AppError> {
    let mut products = ProductRepository::new(state.pool()).list_all().await?;
    products.retain(Product::is_low_stock);
    Ok(Json(products))
}

/// Recent ledger entries, newest first.
pub async fn activity_logs(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<ActivityLogQuery>,
) -> Result<Json<Vec<ActivityLogEntry>>, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT).max(0);
    let entries = ActivityLedger::new(state.pool()).list(limit).await?;
    Ok(Json(entries))
}

/// Full inventory snapshot: every product, per-category counts and the
/// total stock value, stamped with the generation time.
pub async fn inventory_report(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<InventoryReport>, AppError> {
    let products = ProductRepository::new(state.pool()).list_all().await?;
    let categories = CategoryRepository::new(state.pool())
        .list_with_counts()
        .await?;

    let total_value = stats::total_stock_value(&products);

    Ok(Json(InventoryReport {
        products,
        categories,
        total_value,
        generated_at: Utc::now(),
    }))
}
