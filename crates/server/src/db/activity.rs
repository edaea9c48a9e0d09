//! The activity ledger: append-only audit trail of product lifecycle and
//! quantity changes.
//!
//! [`record`] takes a connection rather than the pool so callers can append
//! the ledger entry inside the same transaction as the product write that
//! triggered it. Reads are stateless: newest first, caller-specified limit.

use chrono::Utc;
use sqlx::{PgConnection, PgPool};

use kuber_core::{ActivityLogId, Email, ProductId};

use super::RepositoryError;
use crate::models::{ActivityAction, ActivityLogEntry};

/// Internal row type for activity log queries.
#[derive(Debug, sqlx::FromRow)]
struct ActivityLogRow {
    id: ActivityLogId,
    product_id: ProductId,
    product_name: String,
    action: String,
    quantity_change: i32,
    admin_email: Email,
    timestamp: chrono::DateTime<Utc>,
}

impl TryFrom<ActivityLogRow> for ActivityLogEntry {
    type Error = RepositoryError;

    fn try_from(row: ActivityLogRow) -> Result<Self, Self::Error> {
        let action = row
            .action
            .parse::<ActivityAction>()
            .map_err(RepositoryError::DataCorruption)?;

        Ok(Self {
            id: row.id,
            product_id: row.product_id,
            product_name: row.product_name,
            action,
            quantity_change: row.quantity_change,
            admin_email: row.admin_email,
            timestamp: row.timestamp,
        })
    }
}

/// A ledger entry about to be appended.
#[derive(Debug)]
pub struct NewActivityEntry<'a> {
    /// Product the action applies to.
    pub product_id: ProductId,
    /// Product name at the time of the action (denormalized snapshot).
    pub product_name: &'a str,
    /// What happened.
    pub action: ActivityAction,
    /// Signed quantity delta.
    pub quantity_change: i32,
    /// Email of the acting admin.
    pub admin_email: &'a Email,
}

/// Append one entry to the ledger.
///
/// Runs on the caller's connection so product mutation and audit entry
/// commit (or roll back) together. Failure is never swallowed; it aborts
/// the surrounding transaction and surfaces as a server error.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn record(
    conn: &mut PgConnection,
    entry: NewActivityEntry<'_>,
) -> Result<(), RepositoryError> {
    sqlx::query(
        r"
        INSERT INTO activity_logs (
            id, product_id, product_name, action,
            quantity_change, admin_email, timestamp
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ",
    )
    .bind(ActivityLogId::generate())
    .bind(entry.product_id)
    .bind(entry.product_name)
    .bind(entry.action.as_str())
    .bind(entry.quantity_change)
    .bind(entry.admin_email)
    .bind(Utc::now())
    .execute(conn)
    .await?;

    Ok(())
}

/// Read access to the ledger.
pub struct ActivityLedger<'a> {
    pool: &'a PgPool,
}

impl<'a> ActivityLedger<'a> {
    /// Create a new ledger reader.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the most recent entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored action string
    /// is not a known action kind.
    pub async fn list(&self, limit: i64) -> Result<Vec<ActivityLogEntry>, RepositoryError> {
        let rows = sqlx::query_as::<_, ActivityLogRow>(
            r"
            SELECT id, product_id, product_name, action,
                   quantity_change, admin_email, timestamp
            FROM activity_logs
            ORDER BY timestamp DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
