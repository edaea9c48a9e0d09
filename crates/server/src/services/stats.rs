//! The inventory aggregator: derived statistics computed fresh from the
//! live product set on every request. No memoization, no incremental
//! maintenance - a full scan per call is fine at catalog sizes of
//! thousands of SKUs.
//!
//! All currency math is exact `Decimal` arithmetic; the low-stock count
//! goes through [`Product::is_low_stock`], the same predicate the list
//! filter and the low-stock report use.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Category, Product};

/// Sum of `price * quantity` over the product set.
#[must_use]
pub fn total_stock_value(products: &[Product]) -> Decimal {
    products.iter().map(Product::stock_value).sum()
}

/// Products satisfying the shared low-stock predicate.
#[must_use]
pub fn low_stock(products: &[Product]) -> Vec<&Product> {
    products.iter().filter(|p| p.is_low_stock()).collect()
}

/// Products with zero units on hand.
#[must_use]
pub fn out_of_stock(products: &[Product]) -> Vec<&Product> {
    products.iter().filter(|p| p.is_out_of_stock()).collect()
}

/// Per-category count and summed value.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryBreakdown {
    /// Category name.
    pub name: String,
    /// Number of products whose `category` equals the name.
    pub count: usize,
    /// Summed stock value of those products.
    pub total_value: Decimal,
}

/// Group products by category name. Categories with zero matching products
/// still appear, with zero count and value.
#[must_use]
pub fn category_breakdown(products: &[Product], categories: &[Category]) -> Vec<CategoryBreakdown> {
    categories
        .iter()
        .map(|category| {
            let matching: Vec<&Product> = products
                .iter()
                .filter(|p| p.category == category.name)
                .collect();
            CategoryBreakdown {
                name: category.name.clone(),
                count: matching.len(),
                total_value: matching.iter().map(|p| p.stock_value()).sum(),
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use kuber_core::{CategoryId, ProductId};

    use super::*;
    use crate::models::ProductFilter;

    fn product(name: &str, price: i64, quantity: i32, threshold: i32, category: &str) -> Product {
        Product {
            id: ProductId::generate(),
            name: name.to_string(),
            sku: format!("SKU-{name}"),
            description: None,
            price: Decimal::new(price, 0),
            quantity,
            category: category.to_string(),
            images: vec![],
            low_stock_threshold: threshold,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn category(name: &str) -> Category {
        Category {
            id: CategoryId::generate(),
            name: name.to_string(),
            description: None,
        }
    }

    #[test]
    fn test_gold_necklace_example() {
        // quantity 15 over threshold 10: not low stock
        let mut necklace = product("Gold Necklace", 125_000, 15, 10, "Jewellery");
        assert!(!necklace.is_low_stock());

        // quantity drops to 8: low stock, delta would be -7
        necklace.quantity = 8;
        assert!(necklace.is_low_stock());
        assert_eq!(8 - 15, -7);
    }

    #[test]
    fn test_total_stock_value_exact() {
        let products = vec![
            product("Necklace", 125_000, 15, 10, "Jewellery"),
            product("Scarf", 2_500, 40, 10, "Textiles"),
        ];
        // 125000*15 + 2500*40 = 1_875_000 + 100_000
        assert_eq!(total_stock_value(&products), Decimal::new(1_975_000, 0));
    }

    #[test]
    fn test_total_stock_value_fractional_prices() {
        // Many small fractional prices stay exact in Decimal.
        let products: Vec<Product> = (0..300)
            .map(|i| {
                let mut p = product("Bead", 0, 1, 0, "Handicrafts");
                p.price = Decimal::new(1001 + i, 2); // 10.01, 10.02, ...
                p
            })
            .collect();
        let expected: Decimal = (0..300).map(|i| Decimal::new(1001 + i, 2)).sum();
        assert_eq!(total_stock_value(&products), expected);
    }

    #[test]
    fn test_low_stock_consistent_across_surfaces() {
        let products = vec![
            product("A", 100, 5, 10, "Jewellery"),
            product("B", 100, 10, 10, "Jewellery"),
            product("C", 100, 11, 10, "Jewellery"),
            product("D", 100, 0, 3, "Textiles"),
        ];

        // Aggregator count
        let stats_count = low_stock(&products).len();

        // Report surface
        let report: Vec<&Product> = products.iter().filter(|p| p.is_low_stock()).collect();

        // List filter surface (same retain the repository applies)
        let filter = ProductFilter {
            low_stock_only: true,
            ..ProductFilter::default()
        };
        let mut filtered = products.clone();
        if filter.low_stock_only {
            filtered.retain(Product::is_low_stock);
        }

        assert_eq!(stats_count, 3);
        assert_eq!(report.len(), stats_count);
        assert_eq!(filtered.len(), stats_count);
    }

    #[test]
    fn test_category_breakdown_includes_empty() {
        let products = vec![
            product("Necklace", 125_000, 2, 10, "Jewellery"),
            product("Ring", 40_000, 1, 10, "Jewellery"),
        ];
        let categories = vec![category("Jewellery"), category("Textiles")];

        let breakdown = category_breakdown(&products, &categories);
        assert_eq!(breakdown.len(), 2);

        let jewellery = &breakdown[0];
        assert_eq!(jewellery.count, 2);
        assert_eq!(jewellery.total_value, Decimal::new(290_000, 0));

        let textiles = &breakdown[1];
        assert_eq!(textiles.count, 0);
        assert_eq!(textiles.total_value, Decimal::ZERO);
    }

    #[test]
    fn test_out_of_stock() {
        let products = vec![
            product("A", 100, 0, 10, "Jewellery"),
            product("B", 100, 2, 10, "Jewellery"),
        ];
        assert_eq!(out_of_stock(&products).len(), 1);
    }
}
