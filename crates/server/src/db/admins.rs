//! Admin account repository.
//!
//! Admin records are created at registration or by the seed tool and never
//! updated or deleted by any exposed operation. The password hash stays
//! inside this module except for [`AdminRepository::credentials_by_email`],
//! which the login flow consumes.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use kuber_core::{AdminId, Email};

use super::RepositoryError;
use crate::models::Admin;

/// Internal row type for admin queries (credential field excluded).
#[derive(Debug, sqlx::FromRow)]
struct AdminRow {
    id: AdminId,
    email: Email,
    name: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl From<AdminRow> for Admin {
    fn from(row: AdminRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            name: row.name,
            role: row.role,
            created_at: row.created_at,
        }
    }
}

/// An admin together with the stored password hash, for login verification.
#[derive(Debug)]
pub struct AdminCredentials {
    /// The admin record.
    pub admin: Admin,
    /// bcrypt hash of the password.
    pub password_hash: String,
}

/// Fields for creating an admin account.
#[derive(Debug)]
pub struct NewAdmin<'a> {
    pub email: &'a Email,
    pub password_hash: &'a str,
    pub name: &'a str,
    pub role: &'a str,
}

/// Repository for admin account database operations.
pub struct AdminRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminRepository<'a> {
    /// Create a new admin repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an admin account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already
    /// registered, `RepositoryError::Database` for other failures.
    pub async fn create(&self, input: &NewAdmin<'_>) -> Result<Admin, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(
            r"
            INSERT INTO admins (id, email, password_hash, name, role, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, email, name, role, created_at
            ",
        )
        .bind(AdminId::generate())
        .bind(input.email)
        .bind(input.password_hash)
        .bind(input.name)
        .bind(input.role)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("Email already registered".to_string());
            }
            RepositoryError::Database(e)
        })?;

        Ok(row.into())
    }

    /// Look up an admin by email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(
            r"
            SELECT id, email, name, role, created_at
            FROM admins
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Look up an admin with their password hash, for login.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AdminCredentials>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct CredentialRow {
            #[sqlx(flatten)]
            admin: AdminRow,
            password_hash: String,
        }

        let row = sqlx::query_as::<_, CredentialRow>(
            r"
            SELECT id, email, name, role, created_at, password_hash
            FROM admins
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| AdminCredentials {
            admin: r.admin.into(),
            password_hash: r.password_hash,
        }))
    }

    /// List all admin accounts, newest first, credential field omitted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Admin>, RepositoryError> {
        let rows = sqlx::query_as::<_, AdminRow>(
            r"
            SELECT id, email, name, role, created_at
            FROM admins
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
