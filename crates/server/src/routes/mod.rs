//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! # Auth
//! POST /api/auth/register       - Register an admin
//! POST /api/auth/login          - Login, returns bearer token
//! GET  /api/auth/me             - Current admin record
//!
//! # Categories
//! POST   /api/categories        - Create category
//! GET    /api/categories        - List categories with live product counts
//! DELETE /api/categories/{id}   - Delete category (products untouched)
//!
//! # Products
//! POST   /api/products          - Create product (ledger: created)
//! GET    /api/products          - List with ?category=&search=&low_stock=
//! GET    /api/products/{id}     - Product detail
//! PUT    /api/products/{id}     - Partial update (ledger on quantity change)
//! DELETE /api/products/{id}     - Delete product (ledger: deleted)
//!
//! # Uploads
//! POST /api/upload              - Multipart image upload, data-URI response
//!
//! # Stats and Reports
//! GET /api/stats                - Aggregated statistics
//! GET /api/reports/low-stock    - Products under their threshold
//! GET /api/reports/activity-logs?limit= - Ledger, newest first
//! GET /api/reports/inventory    - Full inventory snapshot
//!
//! # Admins
//! GET /api/admins               - All admins, credential field omitted
//!
//! # Chat
//! POST /api/chat                - Inventory Q&A through OpenRouter
//! ```
//!
//! All routes except register/login (and the health checks mounted in
//! `main`) require a bearer token.

pub mod admins;
pub mod auth;
pub mod categories;
pub mod chat;
pub mod products;
pub mod reports;
pub mod upload;

use axum::Router;

use crate::state::AppState;

/// Build the complete API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(categories::router())
        .merge(products::router())
        .merge(upload::router())
        .merge(reports::router())
        .merge(admins::router())
        .merge(chat::router())
}
