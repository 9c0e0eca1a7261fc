//! # stockroom-core: Pure Inventory Logic for Stockroom
//!
//! This crate is the **heart** of Stockroom. It holds the query engine,
//! the paginator and the dashboard aggregator as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (browser)                           │   │
//! │  │    Products table ──► Suppliers table ──► Dashboard ──► Chart   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ DTOs                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    backoffice commands                          │   │
//! │  │    list_products, set_product_filter, get_dashboard, etc.       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ stockroom-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   query   │  │ pagination │  │ dashboard │  │ validation│  │   │
//! │  │   │  filters  │  │  PageMeta  │  │  Summary  │  │   rules   │  │   │
//! │  │   │  search   │  │  PageState │  │  Chart    │  │  checks   │  │   │
//! │  │   └───────────┘  └────────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORE • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                stockroom-store (Persistence Layer)              │   │
//! │  │              key-value gateway, SQLite, in-memory               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Supplier, Settings)
//! - [`category`] - Ordered, duplicate-free category list
//! - [`money`] - Money type held in integer cents (no floating point!)
//! - [`query`] - Search text and structured filters
//! - [`pagination`] - Page windows, page controls, per-dataset page state
//! - [`dashboard`] - Summary statistics and category counts
//! - [`error`] - Domain error types
//! - [`validation`] - Invariant checks for mutation entry points
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::money::Money;
//!
//! let price = Money::from_cents(1000); // 10.00
//! assert_eq!(price.to_string(), "10.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod category;
pub mod dashboard;
pub mod error;
pub mod money;
pub mod pagination;
pub mod query;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use category::CategoryList;
pub use dashboard::{compute_category_counts, compute_dashboard, CategoryCount, DashboardSummary};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pagination::{paginate, Page, PageControls, PageMeta, PageNav, PageState};
pub use query::{
    filter_products, filter_suppliers, CategoryFilter, DocumentTypeFilter, ProductFilter,
    StockStatus, SupplierFilter,
};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of rows on one page of the Products and Suppliers tables.
pub const PAGE_SIZE: usize = 10;

/// Stock level at or below which a product counts as low stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 10;

/// Currency used until the settings say otherwise.
pub const DEFAULT_CURRENCY: &str = "BRL";

/// Company name shown before settings are saved for the first time.
pub const DEFAULT_COMPANY_NAME: &str = "My Company";

/// Categories seeded into an empty store.
pub const DEFAULT_CATEGORIES: &[&str] = &["Electronics", "Food", "Cleaning", "Clothing"];

/// Sentinel used by the filter controls for "no restriction".
pub const FILTER_ALL: &str = "all";
