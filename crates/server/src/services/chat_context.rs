//! The chat context builder: formats aggregator output and the raw product
//! list into a bounded text block for the external AI call.
//!
//! The caps are mandatory. The context is injected into a fixed-budget
//! prompt, so every product section truncates: 10 low-stock lines, 10
//! out-of-stock lines, 20 summary lines. Every figure comes from the
//! aggregator or the repository; nothing is estimated.

use std::fmt::Write as _;

use rust_decimal::Decimal;

use crate::models::{Category, Product};
use crate::services::stats;

/// Maximum low-stock product lines in the context.
pub const MAX_LOW_STOCK_LINES: usize = 10;
/// Maximum out-of-stock product lines in the context.
pub const MAX_OUT_OF_STOCK_LINES: usize = 10;
/// Maximum general product summary lines in the context.
pub const MAX_SUMMARY_LINES: usize = 20;

/// Format a currency amount as rupees with comma grouping and two decimals.
#[must_use]
pub fn format_inr(amount: Decimal) -> String {
    let rendered = format!("{:.2}", amount.round_dp(2));
    let (integer, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), "00"));
    let (sign, digits) = integer
        .strip_prefix('-')
        .map_or(("", integer), |rest| ("-", rest));

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{sign}{grouped}.{fraction}")
}

/// Build the bounded inventory context block.
#[must_use]
pub fn build_context(products: &[Product], categories: &[Category]) -> String {
    let total_value = stats::total_stock_value(products);
    let low = stats::low_stock(products);
    let out = stats::out_of_stock(products);
    let breakdown = stats::category_breakdown(products, categories);

    let mut ctx = String::new();
    let _ = writeln!(ctx, "REAL INVENTORY DATA (DO NOT MAKE UP ANY NUMBERS):");
    let _ = writeln!(ctx);
    let _ = writeln!(ctx, "Total Products: {}", products.len());
    let _ = writeln!(ctx, "Total Stock Value: ₹{}", format_inr(total_value));
    let _ = writeln!(ctx, "Low Stock Items: {}", low.len());
    let _ = writeln!(ctx, "Out of Stock Items: {}", out.len());
    let _ = writeln!(ctx);

    let _ = writeln!(ctx, "Categories:");
    for entry in &breakdown {
        let _ = writeln!(
            ctx,
            "- {}: {} products, Value: ₹{}",
            entry.name,
            entry.count,
            format_inr(entry.total_value)
        );
    }
    let _ = writeln!(ctx);

    let _ = writeln!(ctx, "Low Stock Products:");
    for p in low.iter().take(MAX_LOW_STOCK_LINES) {
        let _ = writeln!(
            ctx,
            "- {} (SKU: {}): {} units (Threshold: {})",
            p.name, p.sku, p.quantity, p.low_stock_threshold
        );
    }

    if !out.is_empty() {
        let _ = writeln!(ctx);
        let _ = writeln!(ctx, "Out of Stock Products:");
        for p in out.iter().take(MAX_OUT_OF_STOCK_LINES) {
            let _ = writeln!(ctx, "- {} (SKU: {})", p.name, p.sku);
        }
    }

    let _ = writeln!(ctx);
    let _ = writeln!(ctx, "All Products Summary:");
    for p in products.iter().take(MAX_SUMMARY_LINES) {
        let _ = writeln!(
            ctx,
            "- {}: {} units @ ₹{} each ({})",
            p.name,
            p.quantity,
            format_inr(p.price),
            p.category
        );
    }

    ctx
}

/// Wrap the inventory context in the assistant's system prompt.
#[must_use]
pub fn system_prompt(context: &str) -> String {
    format!(
        "You are a helpful inventory assistant for Kuber, a jewellery, handicrafts, \
         and textiles company.\n\n\
         CRITICAL RULES:\n\
         1. Use ONLY the exact numbers and data provided in the inventory context below\n\
         2. NEVER make up or guess any numbers\n\
         3. If asked about a product not in the data, say you don't have that information\n\
         4. Keep responses concise and professional\n\
         5. Format currency as ₹ (Indian Rupees)\n\
         6. If asked about specific products, search the provided data carefully\n\n\
         {context}"
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use kuber_core::{CategoryId, ProductId};

    use super::*;

    fn product(name: &str, price: i64, quantity: i32) -> Product {
        Product {
            id: ProductId::generate(),
            name: name.to_string(),
            sku: format!("SKU-{name}"),
            description: None,
            price: Decimal::new(price, 0),
            quantity,
            category: "Jewellery".to_string(),
            images: vec![],
            low_stock_threshold: 10,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn categories() -> Vec<Category> {
        vec![Category {
            id: CategoryId::generate(),
            name: "Jewellery".to_string(),
            description: None,
        }]
    }

    #[test]
    fn test_format_inr() {
        assert_eq!(format_inr(Decimal::new(125_000, 0)), "125,000.00");
        assert_eq!(format_inr(Decimal::new(1_975_000, 0)), "1,975,000.00");
        assert_eq!(format_inr(Decimal::new(999, 0)), "999.00");
        assert_eq!(format_inr(Decimal::new(250_050, 2)), "2,500.50");
        assert_eq!(format_inr(Decimal::ZERO), "0.00");
    }

    #[test]
    fn test_context_reports_exact_totals() {
        let products = vec![product("Gold Necklace", 125_000, 15)];
        let ctx = build_context(&products, &categories());

        assert!(ctx.contains("Total Products: 1"));
        assert!(ctx.contains("Total Stock Value: ₹1,875,000.00"));
        assert!(ctx.contains("- Jewellery: 1 products, Value: ₹1,875,000.00"));
    }

    #[test]
    fn test_low_stock_lines_capped_at_ten() {
        // 15 low-stock products; only 10 lines may appear
        let products: Vec<Product> = (0..15).map(|i| product(&format!("P{i}"), 100, 2)).collect();
        let ctx = build_context(&products, &categories());

        let low_section = ctx
            .split("Low Stock Products:")
            .nth(1)
            .unwrap()
            .split("\n\n")
            .next()
            .unwrap();
        let lines = low_section.lines().filter(|l| l.starts_with("- ")).count();
        assert_eq!(lines, MAX_LOW_STOCK_LINES);
        assert!(ctx.contains("Low Stock Items: 15"));
    }

    #[test]
    fn test_summary_lines_capped_at_twenty() {
        let products: Vec<Product> = (0..30).map(|i| product(&format!("P{i}"), 100, 50)).collect();
        let ctx = build_context(&products, &categories());

        let summary = ctx.split("All Products Summary:").nth(1).unwrap();
        let lines = summary.lines().filter(|l| l.starts_with("- ")).count();
        assert_eq!(lines, MAX_SUMMARY_LINES);
        assert!(ctx.contains("Total Products: 30"));
    }

    #[test]
    fn test_out_of_stock_section_omitted_when_none() {
        let products = vec![product("Ring", 1000, 50)];
        let ctx = build_context(&products, &categories());
        assert!(!ctx.contains("Out of Stock Products:"));
        assert!(ctx.contains("Out of Stock Items: 0"));
    }

    #[test]
    fn test_out_of_stock_lines_capped_at_ten() {
        let products: Vec<Product> = (0..12).map(|i| product(&format!("P{i}"), 100, 0)).collect();
        let ctx = build_context(&products, &categories());

        let out_section = ctx
            .split("Out of Stock Products:")
            .nth(1)
            .unwrap()
            .split("\n\n")
            .next()
            .unwrap();
        let lines = out_section.lines().filter(|l| l.starts_with("- ")).count();
        assert_eq!(lines, MAX_OUT_OF_STOCK_LINES);
    }

    #[test]
    fn test_system_prompt_embeds_context() {
        let prompt = system_prompt("Total Products: 3");
        assert!(prompt.contains("inventory assistant for Kuber"));
        assert!(prompt.ends_with("Total Products: 3"));
    }
}
