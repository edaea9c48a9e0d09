//! Admin account domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kuber_core::{AdminId, Email};

/// An admin account, minus the credential field.
///
/// The password hash never leaves the repository layer; every exposed
/// surface (`/auth/me`, `/admins`, login response) serializes this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    /// Unique admin ID.
    pub id: AdminId,
    /// Login email (unique).
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Role label (free text, "admin" by default).
    pub role: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
