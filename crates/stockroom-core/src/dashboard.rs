//! # Aggregator
//!
//! Summary statistics for the dashboard cards and per-category product
//! counts for the chart.
//!
//! ## Dashboard Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products ──┬──► count ─────────────────────► totalProducts            │
//! │             ├──► Σ price_cents × stock (i128) ► totalStockValue         │
//! │             └──► stock <= threshold ─────────► lowStockCount            │
//! │  suppliers ────► count ─────────────────────► totalSuppliers           │
//! │                                                                         │
//! │  categories ─┐                                                          │
//! │  products ───┴─► one bar per category, list order, zeros kept           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both functions are pure and recomputed from scratch whenever a collection
//! or the settings change.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::category::CategoryList;
use crate::money::Money;
use crate::types::{Product, Settings, Supplier};

// =============================================================================
// Dashboard Summary
// =============================================================================

/// Numbers shown on the dashboard cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_products: usize,
    pub total_suppliers: usize,
    /// Σ price × stock over all products.
    pub total_stock_value: Money,
    /// Products at or below the low-stock threshold, out of stock included.
    pub low_stock_count: usize,
}

/// Computes the dashboard cards.
///
/// ## Example
/// ```rust
/// use stockroom_core::{compute_dashboard, Product, Settings};
///
/// let products = vec![
///     Product { id: "1".into(), name: "A".into(), code: "A".into(), category: None,
///               price_cents: 1000, stock: 2, expiry: None },
///     Product { id: "2".into(), name: "B".into(), code: "B".into(), category: None,
///               price_cents: 550, stock: 4, expiry: None },
/// ];
/// let summary = compute_dashboard(&products, &[], &Settings::default());
/// assert_eq!(summary.total_stock_value.to_string(), "42.00");
/// ```
pub fn compute_dashboard(
    products: &[Product],
    suppliers: &[Supplier],
    settings: &Settings,
) -> DashboardSummary {
    let threshold = settings.low_stock_threshold;

    // Accumulate wide so one huge line cannot overflow the running total
    let stock_value: i128 = products
        .iter()
        .map(|p| i128::from(p.price_cents) * i128::from(p.stock))
        .sum();

    DashboardSummary {
        total_products: products.len(),
        total_suppliers: suppliers.len(),
        total_stock_value: Money::from_wide_cents(stock_value),
        low_stock_count: products.iter().filter(|p| p.is_low_stock(threshold)).count(),
    }
}

// =============================================================================
// Category Counts
// =============================================================================

/// One bar of the category chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Counts products per category, in category-list order.
///
/// Categories without products get a zero bar. Products that are
/// uncategorized, or whose category is no longer in the list, count nowhere.
pub fn compute_category_counts(products: &[Product], categories: &CategoryList) -> Vec<CategoryCount> {
    categories
        .iter()
        .map(|category| CategoryCount {
            category: category.to_string(),
            count: products
                .iter()
                .filter(|p| p.category() == Some(category))
                .count(),
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
