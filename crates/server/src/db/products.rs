//! Product repository.
//!
//! Every mutation that changes quantity or lifecycle appends a ledger entry
//! through [`super::activity::record`] inside the same transaction, so the
//! product write and its audit record commit together. The delta for a
//! quantity change is computed against the previously persisted value,
//! read under `FOR UPDATE` within that transaction.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use kuber_core::{Email, ProductId};

use super::activity::{self, NewActivityEntry};
use super::{RepositoryError, escape_like};
use crate::models::{ActivityAction, NewProduct, Product, ProductFilter, ProductUpdate};

/// Internal row type for product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    sku: String,
    description: Option<String>,
    price: Decimal,
    quantity: i32,
    category: String,
    images: Vec<String>,
    low_stock_threshold: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            sku: row.sku,
            description: row.description,
            price: row.price,
            quantity: row.quantity,
            category: row.category,
            images: row.images,
            low_stock_threshold: row.low_stock_threshold,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const PRODUCT_COLUMNS: &str = "id, name, sku, description, price, quantity, category, \
                               images, low_stock_threshold, created_at, updated_at";

/// Decide the ledger consequence of a quantity change. Returns the action
/// and the signed delta, or `None` when the quantity is unchanged (an
/// identical-value update appends nothing).
const fn quantity_ledger_action(old: i32, new: i32) -> Option<(ActivityAction, i32)> {
    let delta = new - old;
    if delta > 0 {
        Some((ActivityAction::StockAdded, delta))
    } else if delta < 0 {
        Some((ActivityAction::StockReduced, delta))
    } else {
        None
    }
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a product and append its `created` ledger entry.
    ///
    /// Both timestamps are stamped identically at creation; the ledger
    /// entry carries the initial quantity as its delta.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a write fails; nothing is
    /// persisted in that case.
    pub async fn create(
        &self,
        input: &NewProduct,
        acting_admin: &Email,
    ) -> Result<Product, RepositoryError> {
        let id = ProductId::generate();
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            INSERT INTO products (
                id, name, sku, description, price, quantity, category,
                images, low_stock_threshold, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(id)
        .bind(&input.name)
        .bind(&input.sku)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.quantity)
        .bind(&input.category)
        .bind(&input.images)
        .bind(input.low_stock_threshold)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        activity::record(
            &mut tx,
            NewActivityEntry {
                product_id: id,
                product_name: &input.name,
                action: ActivityAction::Created,
                quantity_change: input.quantity,
                admin_email: acting_admin,
            },
        )
        .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    /// List products with filtering. Category and search narrow the query;
    /// the low-stock filter is applied through the shared predicate so it
    /// can never diverge from stats and reports.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let search_pattern = filter
            .search
            .as_deref()
            .map(|s| format!("%{}%", escape_like(s)));

        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE ($1::text IS NULL OR category = $1)
              AND ($2::text IS NULL OR name ILIKE $2 OR sku ILIKE $2)
            ORDER BY created_at ASC
            "
        ))
        .bind(filter.category.as_deref())
        .bind(search_pattern.as_deref())
        .fetch_all(self.pool)
        .await?;

        let mut products: Vec<Product> = rows.into_iter().map(Into::into).collect();
        if filter.low_stock_only {
            products.retain(Product::is_low_stock);
        }

        Ok(products)
    }

    /// Fetch the full product set. Used by the aggregator and the chat
    /// context builder; every call re-reads live state (no caching).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        self.list(&ProductFilter::default()).await
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Apply a partial update. Only provided fields change; `updated_at`
    /// is always refreshed. A quantity change appends a `stock_added` or
    /// `stock_reduced` ledger entry with the signed delta; setting the
    /// quantity to its current value appends nothing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other failures.
    pub async fn update(
        &self,
        id: ProductId,
        update: &ProductUpdate,
        acting_admin: &Email,
    ) -> Result<Product, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        if let Some(new_quantity) = update.quantity
            && let Some((action, delta)) = quantity_ledger_action(existing.quantity, new_quantity)
        {
            activity::record(
                &mut tx,
                NewActivityEntry {
                    product_id: id,
                    product_name: &existing.name,
                    action,
                    quantity_change: delta,
                    admin_email: acting_admin,
                },
            )
            .await?;
        }

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            UPDATE products
            SET
                name = COALESCE($2, name),
                sku = COALESCE($3, sku),
                description = COALESCE($4, description),
                price = COALESCE($5, price),
                quantity = COALESCE($6, quantity),
                category = COALESCE($7, category),
                images = COALESCE($8, images),
                low_stock_threshold = COALESCE($9, low_stock_threshold),
                updated_at = $10
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(id)
        .bind(update.name.as_deref())
        .bind(update.sku.as_deref())
        .bind(update.description.as_deref())
        .bind(update.price)
        .bind(update.quantity)
        .bind(update.category.as_deref())
        .bind(update.images.clone())
        .bind(update.low_stock_threshold)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    /// Delete a product, appending a `deleted` ledger entry with a zero
    /// delta in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other failures.
    pub async fn delete(
        &self,
        id: ProductId,
        acting_admin: &Email,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let name: Option<String> =
            sqlx::query_scalar("SELECT name FROM products WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let name = name.ok_or(RepositoryError::NotFound)?;

        activity::record(
            &mut tx,
            NewActivityEntry {
                product_id: id,
                product_name: &name,
                action: ActivityAction::Deleted,
                quantity_change: 0,
                admin_email: acting_admin,
            },
        )
        .await?;

        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_increase_ledgers_stock_added() {
        assert_eq!(
            quantity_ledger_action(15, 20),
            Some((ActivityAction::StockAdded, 5))
        );
    }

    #[test]
    fn test_quantity_decrease_ledgers_stock_reduced_with_signed_delta() {
        // The Gold Necklace drop from 15 to 8 units ledgers -7.
        assert_eq!(
            quantity_ledger_action(15, 8),
            Some((ActivityAction::StockReduced, -7))
        );
    }

    #[test]
    fn test_identical_quantity_ledgers_nothing() {
        assert_eq!(quantity_ledger_action(15, 15), None);
        assert_eq!(quantity_ledger_action(0, 0), None);
    }

    #[test]
    fn test_drop_to_zero_ledgers_full_reduction() {
        assert_eq!(
            quantity_ledger_action(4, 0),
            Some((ActivityAction::StockReduced, -4))
        );
    }
}
