//! Database operations for the inventory store.
//!
//! ## Tables
//!
//! - `admins` - Admin authentication records
//! - `categories` - Category master data
//! - `products` - Product master data
//! - `activity_logs` - Append-only audit ledger
//!
//! Migrations are embedded from `crates/server/migrations/` and run on
//! startup. One pool is built at process start and shared by dependency
//! injection through `AppState`; repositories borrow it per request.

pub mod activity;
pub mod admins;
pub mod categories;
pub mod products;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use activity::ActivityLedger;
pub use admins::AdminRepository;
pub use categories::CategoryRepository;
pub use products::ProductRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Escape LIKE wildcards in user-supplied search text so the pattern stays
/// a plain substring match.
#[must_use]
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_plain() {
        assert_eq!(escape_like("necklace"), "necklace");
    }

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("100%_silk"), "100\\%\\_silk");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }
}
