//! # Commands Module
//!
//! Every operation the browser frontend can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (shared page DTO)
//! ├── product.rs    ◄─── Products table, product CRUD
//! ├── supplier.rs   ◄─── Suppliers table, supplier CRUD
//! ├── category.rs   ◄─── Category list and chart
//! ├── settings.rs   ◄─── Settings singleton
//! └── dashboard.rs  ◄─── Dashboard cards
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  frontend: set_stock_status_filter("low")                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  fn set_stock_status_filter(                                            │
//! │      inventory: &InventoryState<S>,  ◄── only the state it needs        │
//! │      view: &mut ViewState,                                              │
//! │      status: String,                 ◄── raw value from the control     │
//! │  ) -> Result<PageDto<ProductDto>, ApiError>                             │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  frontend re-renders the table from the returned page                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands that change what a table shows return the refreshed page, so
//! the caller never has to re-query.

pub mod category;
pub mod dashboard;
pub mod product;
pub mod settings;
pub mod supplier;

use serde::Serialize;

use stockroom_core::{Page, PageControls, PageMeta};

/// One rendered page of a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDto<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
    pub controls: PageControls,
    /// Footer text, e.g. `Showing 1 to 10 of 23`.
    pub label: String,
}

impl<T> From<Page<T>> for PageDto<T> {
    fn from(page: Page<T>) -> Self {
        PageDto {
            controls: PageControls::for_meta(&page.meta),
            label: page.meta.label(),
            meta: page.meta,
            items: page.items,
        }
    }
}
