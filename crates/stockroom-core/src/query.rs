//! # Query Engine
//!
//! Applies free-text search and structured filters to the Products and
//! Suppliers collections.
//!
//! ## How a Query Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Query                                        │
//! │                                                                         │
//! │  search: "milk"   category: "Food"   stockStatus: "low"                │
//! │       │                  │                  │                           │
//! │       ▼                  ▼                  ▼                           │
//! │  name/code/category   exact label      stock <= threshold              │
//! │  contains "milk"?     equals "Food"?                                   │
//! │       │                  │                  │                           │
//! │       └────────── AND ───┴────── AND ───────┘                           │
//! │                          │                                              │
//! │                          ▼                                              │
//! │  Vec<&Product> in original insertion order (no sorting)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is pure: same collection + same filter = same output.
//! Filters arriving from the UI as text (`"all"`, `"low"`, `"company"`) are
//! parsed with `FromStr`; unknown values are a [`ValidationError`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::types::{DocumentType, Product, Supplier};
use crate::FILTER_ALL;

// =============================================================================
// Search Text
// =============================================================================

/// Case-insensitive substring matcher.
#[derive(Debug, Clone)]
struct SearchText {
    needle: String,
}

impl SearchText {
    fn new(raw: &str) -> Self {
        SearchText {
            needle: raw.trim().to_lowercase(),
        }
    }

    /// True when any field contains the needle. Empty needle always matches.
    fn matches_any<'a, I>(&self, fields: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        if self.needle.is_empty() {
            return true;
        }
        fields
            .into_iter()
            .any(|field| field.to_lowercase().contains(&self.needle))
    }
}

// =============================================================================
// Product Filters
// =============================================================================

/// Category dropdown: everything, or one exact label.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(label) => product.category() == Some(label.as_str()),
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        let value = value.trim();
        if value.is_empty() || value == FILTER_ALL {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        CategoryFilter::from(value.to_string())
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        match filter {
            CategoryFilter::All => FILTER_ALL.to_string(),
            CategoryFilter::Only(label) => label,
        }
    }
}

/// Stock dropdown.
///
/// `Low` is inclusive of the threshold and of empty shelves, so a product
/// with zero stock matches both `Low` and `Out`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    #[default]
    All,
    /// stock <= threshold
    Low,
    /// stock > threshold
    Normal,
    /// stock == 0
    Out,
}

impl StockStatus {
    pub const ALL_VALUES: [&'static str; 4] = ["all", "low", "normal", "out"];

    pub fn matches(&self, stock: i64, low_stock_threshold: u32) -> bool {
        let threshold = i64::from(low_stock_threshold);
        match self {
            StockStatus::All => true,
            StockStatus::Low => stock <= threshold,
            StockStatus::Normal => stock > threshold,
            StockStatus::Out => stock == 0,
        }
    }
}

impl FromStr for StockStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(StockStatus::All),
            "low" => Ok(StockStatus::Low),
            "normal" => Ok(StockStatus::Normal),
            "out" => Ok(StockStatus::Out),
            _ => Err(ValidationError::NotAllowed {
                field: "stockStatus".to_string(),
                allowed: StockStatus::ALL_VALUES.iter().map(|v| v.to_string()).collect(),
            }),
        }
    }
}

/// Filter state of the Products table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductFilter {
    pub search: String,
    pub category: CategoryFilter,
    pub stock_status: StockStatus,
}

impl ProductFilter {
    /// True when the product passes the search AND both structured filters.
    ///
    /// Search looks at name, code and category; a missing category simply
    /// contributes nothing.
    pub fn matches(&self, product: &Product, low_stock_threshold: u32) -> bool {
        let search = SearchText::new(&self.search);
        self.matches_with(&search, product, low_stock_threshold)
    }

    fn matches_with(&self, search: &SearchText, product: &Product, low_stock_threshold: u32) -> bool {
        let fields = [product.name.as_str(), product.code.as_str()]
            .into_iter()
            .chain(product.category());

        search.matches_any(fields)
            && self.category.matches(product)
            && self.stock_status.matches(product.stock, low_stock_threshold)
    }
}

/// Runs a product query, preserving collection order.
pub fn filter_products<'a>(
    products: &'a [Product],
    filter: &ProductFilter,
    low_stock_threshold: u32,
) -> Vec<&'a Product> {
    let search = SearchText::new(&filter.search);
    products
        .iter()
        .filter(|p| filter.matches_with(&search, p, low_stock_threshold))
        .collect()
}

// =============================================================================
// Supplier Filters
// =============================================================================

/// Document type dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DocumentTypeFilter {
    #[default]
    All,
    Only(DocumentType),
}

impl FromStr for DocumentTypeFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(FILTER_ALL) {
            return Ok(DocumentTypeFilter::All);
        }
        s.parse().map(DocumentTypeFilter::Only)
    }
}

impl TryFrom<String> for DocumentTypeFilter {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DocumentTypeFilter> for String {
    fn from(filter: DocumentTypeFilter) -> Self {
        filter.to_string()
    }
}

impl fmt::Display for DocumentTypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentTypeFilter::All => f.write_str(FILTER_ALL),
            DocumentTypeFilter::Only(doc) => write!(f, "{}", doc),
        }
    }
}

/// Filter state of the Suppliers table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SupplierFilter {
    pub search: String,
    pub document_type: DocumentTypeFilter,
}

impl SupplierFilter {
    pub fn matches(&self, supplier: &Supplier) -> bool {
        self.matches_with(&SearchText::new(&self.search), supplier)
    }

    fn matches_with(&self, search: &SearchText, supplier: &Supplier) -> bool {
        let fields = [
            supplier.legal_name.as_str(),
            supplier.trade_name_or_empty(),
            supplier.document.as_str(),
        ];

        let type_ok = match self.document_type {
            DocumentTypeFilter::All => true,
            DocumentTypeFilter::Only(doc) => supplier.document_type == doc,
        };

        type_ok && search.matches_any(fields)
    }
}

/// Runs a supplier query, preserving collection order.
pub fn filter_suppliers<'a>(suppliers: &'a [Supplier], filter: &SupplierFilter) -> Vec<&'a Supplier> {
    let search = SearchText::new(&filter.search);
    suppliers
        .iter()
        .filter(|s| filter.matches_with(&search, s))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, code: &str, category: Option<&str>, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            code: code.to_string(),
            category: category.map(str::to_string),
            price_cents: 100,
            stock,
            expiry: None,
        }
    }

    fn supplier(id: &str, legal: &str, trade: Option<&str>, doc: &str, kind: DocumentType) -> Supplier {
        Supplier {
            id: id.to_string(),
            legal_name: legal.to_string(),
            trade_name: trade.map(str::to_string),
            document: doc.to_string(),
            document_type: kind,
            phone: "555-0100".to_string(),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("1", "Whole Milk", "P001", Some("Food"), 12),
            product("2", "Phone Charger", "E-100", Some("Electronics"), 0),
            product("3", "Bleach", "C-7", None, 4),
            product("4", "Skim Milk", "P002", Some("Food"), 10),
            product("5", "T-Shirt", "CL-1", Some("Clothing"), 0),
        ]
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_search_is_case_insensitive_on_name() {
        let products = vec![product("1", "Whole Milk", "P001", None, 5)];
        let filter = ProductFilter {
            search: "MILK".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_products(&products, &filter, 10)), vec!["1"]);
    }

    #[test]
    fn test_search_matches_code_and_category() {
        let products = catalog();

        let by_code = ProductFilter {
            search: "e-1".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_products(&products, &by_code, 10)), vec!["2"]);

        let by_category = ProductFilter {
            search: "food".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_products(&products, &by_category, 10)), vec!["1", "4"]);
    }

    #[test]
    fn test_missing_category_does_not_break_search() {
        let products = catalog();
        let filter = ProductFilter {
            search: "bleach".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_products(&products, &filter, 10)), vec!["3"]);
    }

    #[test]
    fn test_stock_out_keeps_order() {
        let products = vec![
            product("a", "A", "A", None, 0),
            product("b", "B", "B", None, 1),
            product("c", "C", "C", None, 0),
        ];
        let filter = ProductFilter {
            stock_status: StockStatus::Out,
            ..Default::default()
        };
        assert_eq!(ids(&filter_products(&products, &filter, 10)), vec!["a", "c"]);
    }

    #[test]
    fn test_stock_low_and_normal_split_at_threshold() {
        let products = catalog();
        let low = ProductFilter {
            stock_status: StockStatus::Low,
            ..Default::default()
        };
        let normal = ProductFilter {
            stock_status: StockStatus::Normal,
            ..Default::default()
        };
        assert_eq!(ids(&filter_products(&products, &low, 10)), vec!["2", "3", "4", "5"]);
        assert_eq!(ids(&filter_products(&products, &normal, 10)), vec!["1"]);
    }

    #[test]
    fn test_all_predicates_are_anded() {
        let products = catalog();
        let filter = ProductFilter {
            search: "milk".to_string(),
            category: CategoryFilter::from("Food"),
            stock_status: StockStatus::Low,
        };
        assert_eq!(ids(&filter_products(&products, &filter, 10)), vec!["4"]);
    }

    #[test]
    fn test_result_is_ordered_subsequence_and_idempotent() {
        let products = catalog();
        let filter = ProductFilter {
            stock_status: StockStatus::Low,
            ..Default::default()
        };

        let first = filter_products(&products, &filter, 10);
        let second = filter_products(&products, &filter, 10);
        assert_eq!(first, second);

        let positions: Vec<usize> = first
            .iter()
            .map(|p| products.iter().position(|q| q.id == p.id).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_empty_filter_returns_everything() {
        let products = catalog();
        assert_eq!(filter_products(&products, &ProductFilter::default(), 10).len(), 5);
        assert!(filter_products(&[], &ProductFilter::default(), 10).is_empty());
    }

    #[test]
    fn test_filter_values_parse_from_text() {
        assert_eq!("all".parse::<StockStatus>().unwrap(), StockStatus::All);
        assert_eq!("OUT".parse::<StockStatus>().unwrap(), StockStatus::Out);
        assert!("empty".parse::<StockStatus>().is_err());

        assert_eq!(CategoryFilter::from("all"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from("Food"),
            CategoryFilter::Only("Food".to_string())
        );

        assert_eq!(
            "company".parse::<DocumentTypeFilter>().unwrap(),
            DocumentTypeFilter::Only(DocumentType::Company)
        );
        assert_eq!("all".parse::<DocumentTypeFilter>().unwrap(), DocumentTypeFilter::All);
    }

    #[test]
    fn test_product_filter_json_shape() {
        let filter: ProductFilter = serde_json::from_value(serde_json::json!({
            "search": "milk",
            "category": "all",
            "stockStatus": "low"
        }))
        .unwrap();
        assert_eq!(filter.category, CategoryFilter::All);
        assert_eq!(filter.stock_status, StockStatus::Low);
    }

    #[test]
    fn test_supplier_search_and_type() {
        let suppliers = vec![
            supplier("1", "Acme Comercio Ltda", Some("Acme"), "11.111.111/0001-11", DocumentType::Company),
            supplier("2", "Maria Souza", None, "123.456.789-00", DocumentType::Individual),
            supplier("3", "Beta Distribuidora", Some("Beta"), "22.222.222/0001-22", DocumentType::Company),
        ];

        let by_trade = SupplierFilter {
            search: "acme".to_string(),
            ..Default::default()
        };
        assert_eq!(filter_suppliers(&suppliers, &by_trade).len(), 1);

        // Supplier 2 has no trade name; searching must not panic and still
        // matches on the document.
        let by_doc = SupplierFilter {
            search: "789".to_string(),
            ..Default::default()
        };
        let found = filter_suppliers(&suppliers, &by_doc);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "2");

        let companies = SupplierFilter {
            document_type: DocumentTypeFilter::Only(DocumentType::Company),
            ..Default::default()
        };
        let found: Vec<&str> = filter_suppliers(&suppliers, &companies)
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(found, vec!["1", "3"]);
    }
}
