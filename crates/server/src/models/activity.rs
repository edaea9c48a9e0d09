//! Activity ledger domain models.
//!
//! Entries are append-only: nothing updates or deletes them, and
//! `product_id` may dangle after the product is gone. `product_name` is
//! denormalized so history stays readable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kuber_core::{ActivityLogId, Email, ProductId};

/// What happened to a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    /// Product created; `quantity_change` is the initial quantity.
    Created,
    /// Quantity increased; `quantity_change` is the positive delta.
    StockAdded,
    /// Quantity decreased; `quantity_change` is the negative delta.
    StockReduced,
    /// Product deleted; `quantity_change` is always 0.
    Deleted,
}

impl ActivityAction {
    /// The stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::StockAdded => "stock_added",
            Self::StockReduced => "stock_reduced",
            Self::Deleted => "deleted",
        }
    }
}

impl std::fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActivityAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(Self::Created),
            "stock_added" => Ok(Self::StockAdded),
            "stock_reduced" => Ok(Self::StockReduced),
            "deleted" => Ok(Self::Deleted),
            other => Err(format!("unknown activity action: {other}")),
        }
    }
}

/// One immutable audit record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    /// Unique entry ID.
    pub id: ActivityLogId,
    /// Product the entry refers to (soft reference, may dangle).
    pub product_id: ProductId,
    /// Product name at the time of the action.
    pub product_name: String,
    /// What happened.
    pub action: ActivityAction,
    /// Signed quantity delta.
    pub quantity_change: i32,
    /// Email of the acting admin.
    pub admin_email: Email,
    /// When the action happened.
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_action_string_roundtrip() {
        for action in [
            ActivityAction::Created,
            ActivityAction::StockAdded,
            ActivityAction::StockReduced,
            ActivityAction::Deleted,
        ] {
            let parsed: ActivityAction = action.as_str().parse().unwrap();
            assert_eq!(parsed, action);
        }
    }

    #[test]
    fn test_action_unknown_rejected() {
        assert!("restocked".parse::<ActivityAction>().is_err());
    }

    #[test]
    fn test_action_serde_snake_case() {
        let json = serde_json::to_string(&ActivityAction::StockReduced).unwrap();
        assert_eq!(json, "\"stock_reduced\"");
    }
}
