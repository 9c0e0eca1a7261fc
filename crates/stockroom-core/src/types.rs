//! # Domain Types
//!
//! Core domain types used throughout Stockroom.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Supplier     │   │    Settings     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  companyName    │       │
//! │  │  code, name     │   │  legalName      │   │  lowStock...    │       │
//! │  │  category?      │   │  tradeName?     │   │  currency       │       │
//! │  │  price_cents    │   │  document       │   │  autoBackup     │       │
//! │  │  stock, expiry? │   │  documentType   │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names serialize in camelCase: these structs are exactly what the
//! store holds under the `products`, `suppliers` and `settings` keys.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::{DEFAULT_COMPANY_NAME, DEFAULT_CURRENCY, DEFAULT_LOW_STOCK_THRESHOLD};

/// Label shown for a product without a category.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

// =============================================================================
// Product
// =============================================================================

/// A product held in stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier. New records get a UUID v4.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Business code, searchable.
    pub code: String,

    /// Category label; absent when the product is uncategorized.
    #[serde(default)]
    pub category: Option<String>,

    /// Unit price in cents.
    pub price_cents: i64,

    /// Units on hand.
    pub stock: i64,

    /// Expiry date for perishable goods.
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub expiry: Option<NaiveDate>,
}

impl Product {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Category label, treating an empty string the same as no category.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    /// Category label for display, falling back to [`UNCATEGORIZED_LABEL`].
    pub fn category_label(&self) -> &str {
        self.category().unwrap_or(UNCATEGORIZED_LABEL)
    }

    /// True when stock is at or below the threshold (inclusive).
    #[inline]
    pub fn is_low_stock(&self, threshold: u32) -> bool {
        self.stock <= i64::from(threshold)
    }

    #[inline]
    pub fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }

    /// Classifies the stock level for display.
    pub fn stock_level(&self, threshold: u32) -> StockLevel {
        if self.is_out_of_stock() {
            StockLevel::Out
        } else if self.is_low_stock(threshold) {
            StockLevel::Low
        } else {
            StockLevel::Normal
        }
    }
}

/// Display classification of a product's stock.
///
/// Unlike the `low` filter (which also matches empty shelves), each product
/// falls in exactly one level here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    Out,
    Low,
    Normal,
}

// =============================================================================
// Supplier
// =============================================================================

/// Kind of registration document a supplier holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// A person.
    Individual,
    /// A registered business.
    Company,
}

impl DocumentType {
    pub const ALL: [DocumentType; 2] = [DocumentType::Individual, DocumentType::Company];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Individual => "individual",
            DocumentType::Company => "company",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "individual" => Ok(DocumentType::Individual),
            "company" => Ok(DocumentType::Company),
            _ => Err(ValidationError::NotAllowed {
                field: "documentType".to_string(),
                allowed: DocumentType::ALL
                    .iter()
                    .map(|d| d.as_str().to_string())
                    .collect(),
            }),
        }
    }
}

/// A supplier of products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    /// Unique identifier. New records get a UUID v4.
    pub id: String,

    /// Registered legal name.
    pub legal_name: String,

    /// Name the supplier trades under, if different.
    #[serde(default)]
    pub trade_name: Option<String>,

    /// Registration document number.
    pub document: String,

    pub document_type: DocumentType,

    pub phone: String,
}

impl Supplier {
    /// Trade name, or the empty string when absent.
    pub fn trade_name_or_empty(&self) -> &str {
        self.trade_name.as_deref().unwrap_or("")
    }

    /// Name to show in tables: the trade name when present, else the legal name.
    pub fn display_name(&self) -> &str {
        match self.trade_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.legal_name,
        }
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Process-wide settings singleton.
///
/// Missing fields in a persisted settings object take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub company_name: String,

    /// Products with stock at or below this count are "low stock".
    pub low_stock_threshold: u32,

    /// ISO 4217 currency code.
    pub default_currency: String,

    pub auto_backup: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            company_name: DEFAULT_COMPANY_NAME.to_string(),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            default_currency: DEFAULT_CURRENCY.to_string(),
            auto_backup: false,
        }
    }
}

impl Settings {
    /// Trims the company name and upper-cases the currency code.
    pub fn normalized(self) -> Self {
        Settings {
            company_name: self.company_name.trim().to_string(),
            default_currency: self.default_currency.trim().to_uppercase(),
            ..self
        }
    }

    /// Formats an amount in the configured currency.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::{Money, Settings};
    ///
    /// let settings = Settings::default(); // BRL
    /// assert_eq!(settings.format_money(Money::from_cents(4200)), "R$ 42.00");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        let digits = format!("{}.{:02}", amount.major().abs(), amount.minor());

        match self.default_currency.as_str() {
            "BRL" => format!("{}R$ {}", sign, digits),
            "USD" => format!("{}${}", sign, digits),
            "EUR" => format!("{}€{}", sign, digits),
            "GBP" => format!("{}£{}", sign, digits),
            code => format!("{}{} {}", sign, code, digits),
        }
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// The two paginated tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    Products,
    Suppliers,
}

impl Dataset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dataset::Products => "products",
            Dataset::Suppliers => "suppliers",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
