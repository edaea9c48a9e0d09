//! Product domain models.
//!
//! `category` is a soft reference to a category's name, not a foreign key:
//! renaming or deleting a category leaves the string on existing products.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kuber_core::ProductId;

/// Threshold applied when a create payload doesn't specify one.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 10;

/// A product record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Stock keeping unit (free text, not enforced unique).
    pub sku: String,
    /// Optional description.
    pub description: Option<String>,
    /// Unit price (currency amount).
    pub price: Decimal,
    /// Units on hand.
    pub quantity: i32,
    /// Category name this product belongs to (soft reference).
    pub category: String,
    /// Image references (data URIs or filenames).
    pub images: Vec<String>,
    /// Quantity at or below which the product counts as low stock.
    pub low_stock_threshold: i32,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// The single low-stock predicate.
    ///
    /// Stats, the low-stock report, and the list filter all route through
    /// here so the three surfaces can never disagree.
    #[must_use]
    pub const fn is_low_stock(&self) -> bool {
        self.quantity <= self.low_stock_threshold
    }

    /// Whether the product has no units on hand.
    #[must_use]
    pub const fn is_out_of_stock(&self) -> bool {
        self.quantity == 0
    }

    /// Value of the units on hand (`price * quantity`), exact decimal.
    #[must_use]
    pub fn stock_value(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Payload for creating a product.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub sku: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
    pub category: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i32,
}

const fn default_low_stock_threshold() -> i32 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

/// Partial update payload: only fields present in the request change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<i32>,
    pub category: Option<String>,
    pub images: Option<Vec<String>>,
    pub low_stock_threshold: Option<i32>,
}

/// Filter for product listing. Filters AND-compose.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Exact category name match.
    pub category: Option<String>,
    /// Case-insensitive substring match against name OR sku.
    pub search: Option<String>,
    /// Keep only products satisfying the shared low-stock predicate.
    pub low_stock_only: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(quantity: i32, threshold: i32) -> Product {
        Product {
            id: ProductId::generate(),
            name: "Gold Necklace".to_string(),
            sku: "JWL-001".to_string(),
            description: None,
            price: Decimal::new(125_000, 0),
            quantity,
            category: "Jewellery".to_string(),
            images: vec![],
            low_stock_threshold: threshold,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_low_stock_predicate_boundary() {
        assert!(!product(15, 10).is_low_stock());
        assert!(product(10, 10).is_low_stock());
        assert!(product(8, 10).is_low_stock());
        assert!(product(0, 10).is_low_stock());
    }

    #[test]
    fn test_out_of_stock() {
        assert!(product(0, 10).is_out_of_stock());
        assert!(!product(1, 10).is_out_of_stock());
    }

    #[test]
    fn test_stock_value_is_exact() {
        let p = product(15, 10);
        assert_eq!(p.stock_value(), Decimal::new(1_875_000, 0));
    }

    #[test]
    fn test_new_product_defaults() {
        let new: NewProduct = serde_json::from_str(
            r#"{"name":"Silk Scarf","sku":"TEX-9","price":"2500","quantity":3,"category":"Textiles"}"#,
        )
        .unwrap();
        assert_eq!(new.low_stock_threshold, DEFAULT_LOW_STOCK_THRESHOLD);
        assert!(new.images.is_empty());
        assert!(new.description.is_none());
    }

    #[test]
    fn test_product_update_partial() {
        let upd: ProductUpdate = serde_json::from_str(r#"{"quantity":8}"#).unwrap();
        assert_eq!(upd.quantity, Some(8));
        assert!(upd.name.is_none());

        // An empty payload parses; every field stays absent.
        let empty: ProductUpdate = serde_json::from_str("{}").unwrap();
        assert!(empty.quantity.is_none());
        assert!(empty.price.is_none());
    }
}
