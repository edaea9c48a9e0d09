//! Category domain models.

use serde::{Deserialize, Serialize};

use kuber_core::CategoryId;

/// A category record. Duplicate names are permitted (observed behavior of
/// the store; callers create categories without a uniqueness check).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique category ID.
    pub id: CategoryId,
    /// Category name; products reference it by this string.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// A category with its live product count.
///
/// `product_count` is always recomputed by counting products whose
/// `category` field equals the category name - never read from storage.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryWithCount {
    #[serde(flatten)]
    pub category: Category,
    pub product_count: i64,
}

/// Payload for creating a category.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_category_with_count_serializes_flat() {
        let with_count = CategoryWithCount {
            category: Category {
                id: CategoryId::generate(),
                name: "Jewellery".to_string(),
                description: None,
            },
            product_count: 4,
        };

        let value = serde_json::to_value(&with_count).unwrap();
        assert_eq!(value["name"], "Jewellery");
        assert_eq!(value["product_count"], 4);
    }
}
