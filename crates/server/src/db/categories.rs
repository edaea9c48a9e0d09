//! Category repository.
//!
//! `product_count` is recomputed from the live product set on every read;
//! no stored counter exists to go stale. Deleting a category never cascades
//! to products - the category string simply remains on them.

use sqlx::PgPool;

use kuber_core::CategoryId;

use super::RepositoryError;
use crate::models::{Category, CategoryWithCount, NewCategory};

/// Internal row type for category queries.
#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: CategoryId,
    name: String,
    description: Option<String>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
        }
    }
}

/// Internal row type for category queries with a live product count.
#[derive(Debug, sqlx::FromRow)]
struct CategoryCountRow {
    #[sqlx(flatten)]
    category: CategoryRow,
    product_count: i64,
}

/// Repository for category database operations.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a category. No uniqueness check on the name; duplicate names
    /// are permitted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &NewCategory) -> Result<Category, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r"
            INSERT INTO categories (id, name, description)
            VALUES ($1, $2, $3)
            RETURNING id, name, description
            ",
        )
        .bind(CategoryId::generate())
        .bind(&input.name)
        .bind(&input.description)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// List all categories with their product counts recomputed per item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_with_counts(&self) -> Result<Vec<CategoryWithCount>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryCountRow>(
            r"
            SELECT c.id, c.name, c.description,
                   (SELECT COUNT(*) FROM products p WHERE p.category = c.name) AS product_count
            FROM categories c
            ORDER BY c.name ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| CategoryWithCount {
                category: row.category.into(),
                product_count: row.product_count,
            })
            .collect())
    }

    /// Count all categories.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// List all categories without counts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, description FROM categories ORDER BY name ASC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Delete a category. Referencing products are left untouched; a
    /// warning is logged when the deleted name is still in use so the
    /// orphaned soft reference is at least visible.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category doesn't exist.
    /// Returns `RepositoryError::Database` for other failures.
    pub async fn delete(&self, id: CategoryId) -> Result<(), RepositoryError> {
        let name: Option<String> =
            sqlx::query_scalar("DELETE FROM categories WHERE id = $1 RETURNING name")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        let name = name.ok_or(RepositoryError::NotFound)?;

        let referencing: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE category = $1")
                .bind(&name)
                .fetch_one(self.pool)
                .await?;

        if referencing > 0 {
            tracing::warn!(
                category = %name,
                products = referencing,
                "deleted category is still referenced by products"
            );
        }

        Ok(())
    }
}
