//! # View State
//!
//! Filters and current pages for the Products and Suppliers tables.
//!
//! ## Render Cycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  trigger: search typed │ filter picked │ page button                   │
//! │       │                                                                 │
//! │       ├── search / filter change ──► page reset to 1                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  filter_products(all, filter, threshold)   ← from scratch every time   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  clamp current page into 1..=total_pages   ← after deletes             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  paginate(filtered, page, PAGE_SIZE) ──► rows + meta + controls        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use stockroom_core::pagination::total_pages;
use stockroom_core::{
    filter_products, filter_suppliers, paginate, CategoryFilter, Dataset, DocumentTypeFilter,
    Page, PageNav, PageState, Product, ProductFilter, StockStatus, Supplier, SupplierFilter,
    PAGE_SIZE,
};
use tracing::debug;

/// Filter and page state of both tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    product_filter: ProductFilter,
    supplier_filter: SupplierFilter,
    pages: PageState,
}

impl ViewState {
    pub fn new() -> Self {
        ViewState::default()
    }

    pub fn product_filter(&self) -> &ProductFilter {
        &self.product_filter
    }

    pub fn supplier_filter(&self) -> &SupplierFilter {
        &self.supplier_filter
    }

    pub fn pages(&self) -> &PageState {
        &self.pages
    }

    // =========================================================================
    // Filters
    // =========================================================================

    pub fn set_product_filter(&mut self, filter: ProductFilter) {
        debug!(?filter, "Product filter changed");
        self.product_filter = filter;
        self.pages.reset(Dataset::Products);
    }

    pub fn set_product_search(&mut self, search: impl Into<String>) {
        let filter = ProductFilter {
            search: search.into(),
            ..self.product_filter.clone()
        };
        self.set_product_filter(filter);
    }

    pub fn set_category_filter(&mut self, category: CategoryFilter) {
        let filter = ProductFilter {
            category,
            ..self.product_filter.clone()
        };
        self.set_product_filter(filter);
    }

    pub fn set_stock_status(&mut self, stock_status: StockStatus) {
        let filter = ProductFilter {
            stock_status,
            ..self.product_filter.clone()
        };
        self.set_product_filter(filter);
    }

    pub fn set_supplier_filter(&mut self, filter: SupplierFilter) {
        debug!(?filter, "Supplier filter changed");
        self.supplier_filter = filter;
        self.pages.reset(Dataset::Suppliers);
    }

    pub fn set_supplier_search(&mut self, search: impl Into<String>) {
        let filter = SupplierFilter {
            search: search.into(),
            ..self.supplier_filter.clone()
        };
        self.set_supplier_filter(filter);
    }

    pub fn set_document_type(&mut self, document_type: DocumentTypeFilter) {
        let filter = SupplierFilter {
            document_type,
            ..self.supplier_filter.clone()
        };
        self.set_supplier_filter(filter);
    }

    // =========================================================================
    // Pages
    // =========================================================================

    /// Current page of products, after filtering and clamping.
    pub fn product_page<'a>(&mut self, products: &'a [Product], threshold: u32) -> Page<&'a Product> {
        let filtered = filter_products(products, &self.product_filter, threshold);
        let page = self
            .pages
            .clamp(Dataset::Products, total_pages(filtered.len(), PAGE_SIZE));
        paginate(&filtered, page, PAGE_SIZE)
    }

    /// Current page of suppliers, after filtering and clamping.
    pub fn supplier_page<'a>(&mut self, suppliers: &'a [Supplier]) -> Page<&'a Supplier> {
        let filtered = filter_suppliers(suppliers, &self.supplier_filter);
        let page = self
            .pages
            .clamp(Dataset::Suppliers, total_pages(filtered.len(), PAGE_SIZE));
        paginate(&filtered, page, PAGE_SIZE)
    }

    /// Moves the products table. Returns `false` for a disabled control.
    pub fn navigate_products(&mut self, nav: PageNav, products: &[Product], threshold: u32) -> bool {
        let count = filter_products(products, &self.product_filter, threshold).len();
        self.pages
            .apply(Dataset::Products, nav, total_pages(count, PAGE_SIZE))
    }

    /// Moves the suppliers table. Returns `false` for a disabled control.
    pub fn navigate_suppliers(&mut self, nav: PageNav, suppliers: &[Supplier]) -> bool {
        let count = filter_suppliers(suppliers, &self.supplier_filter).len();
        self.pages
            .apply(Dataset::Suppliers, nav, total_pages(count, PAGE_SIZE))
    }
}
