//! # Product Commands
//!
//! The Products table and product create / update / delete.
//!
//! ## Table Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  search box ──────► set_product_search ─────┐                          │
//! │  category select ─► set_category_filter ────┤  page reset to 1         │
//! │  stock select ────► set_stock_status_filter ┘                          │
//! │                                             │                          │
//! │  page buttons ────► change_products_page ───┤                          │
//! │                                             ▼                          │
//! │                                 PageDto<ProductDto> back to the table  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info};
use ts_rs::TS;

use super::PageDto;
use crate::error::ApiError;
use crate::state::{InventoryState, ProductInput, ViewState};
use stockroom_core::validation::validate_search_query;
use stockroom_core::{CategoryFilter, PageNav, Product, Settings, StockLevel, StockStatus};
use stockroom_store::KeyValueStore;

/// Product row as the frontend renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub code: String,
    pub category: Option<String>,
    /// Category, or "Uncategorized".
    pub category_label: String,
    pub price_cents: i64,
    /// Price in the configured currency, e.g. `R$ 10.00`.
    pub price: String,
    pub stock: i64,
    pub stock_level: StockLevel,
    /// ISO date (`YYYY-MM-DD`).
    pub expiry: Option<String>,
}

impl ProductDto {
    pub fn new(product: &Product, settings: &Settings) -> Self {
        ProductDto {
            id: product.id.clone(),
            name: product.name.clone(),
            code: product.code.clone(),
            category: product.category().map(str::to_string),
            category_label: product.category_label().to_string(),
            price_cents: product.price_cents,
            price: settings.format_money(product.price()),
            stock: product.stock,
            stock_level: product.stock_level(settings.low_stock_threshold),
            expiry: product.expiry.map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}

/// Current page of the Products table.
pub fn list_products<S: KeyValueStore>(
    inventory: &InventoryState<S>,
    view: &mut ViewState,
) -> Result<PageDto<ProductDto>, ApiError> {
    let settings = inventory.settings();
    let page = view
        .product_page(inventory.products(), settings.low_stock_threshold)
        .map(|p| ProductDto::new(p, settings));

    debug!(
        page = page.meta.page,
        total = page.meta.total_items,
        "list_products command"
    );

    Ok(page.into())
}

pub fn get_product<S: KeyValueStore>(
    inventory: &InventoryState<S>,
    id: String,
) -> Result<ProductDto, ApiError> {
    debug!(id = %id, "get_product command");
    let product = inventory.get_product(&id)?;
    Ok(ProductDto::new(product, inventory.settings()))
}

pub async fn create_product<S: KeyValueStore>(
    inventory: &mut InventoryState<S>,
    input: ProductInput,
) -> Result<ProductDto, ApiError> {
    debug!(code = %input.code, "create_product command");
    let product = inventory.create_product(input).await?;
    Ok(ProductDto::new(&product, inventory.settings()))
}

pub async fn update_product<S: KeyValueStore>(
    inventory: &mut InventoryState<S>,
    id: String,
    input: ProductInput,
) -> Result<ProductDto, ApiError> {
    debug!(id = %id, "update_product command");
    let product = inventory.update_product(&id, input).await?;
    Ok(ProductDto::new(&product, inventory.settings()))
}

/// Deletes a product and returns the refreshed table.
pub async fn delete_product<S: KeyValueStore>(
    inventory: &mut InventoryState<S>,
    view: &mut ViewState,
    id: String,
) -> Result<PageDto<ProductDto>, ApiError> {
    debug!(id = %id, "delete_product command");
    inventory.delete_product(&id).await?;
    list_products(inventory, view)
}

pub fn set_product_search<S: KeyValueStore>(
    inventory: &InventoryState<S>,
    view: &mut ViewState,
    query: String,
) -> Result<PageDto<ProductDto>, ApiError> {
    let query = validate_search_query(&query)?;
    debug!(query = %query, "set_product_search command");
    view.set_product_search(query);
    list_products(inventory, view)
}

/// `category` is a label from the dropdown, or `all`.
pub fn set_category_filter<S: KeyValueStore>(
    inventory: &InventoryState<S>,
    view: &mut ViewState,
    category: String,
) -> Result<PageDto<ProductDto>, ApiError> {
    debug!(category = %category, "set_category_filter command");
    view.set_category_filter(CategoryFilter::from(category));
    list_products(inventory, view)
}

/// `status` is one of `all`, `low`, `normal`, `out`.
pub fn set_stock_status_filter<S: KeyValueStore>(
    inventory: &InventoryState<S>,
    view: &mut ViewState,
    status: String,
) -> Result<PageDto<ProductDto>, ApiError> {
    let status: StockStatus = status.parse()?;
    debug!(?status, "set_stock_status_filter command");
    view.set_stock_status(status);
    list_products(inventory, view)
}

/// Applies a page button. Disabled buttons leave the page unchanged.
pub fn change_products_page<S: KeyValueStore>(
    inventory: &InventoryState<S>,
    view: &mut ViewState,
    nav: PageNav,
) -> Result<PageDto<ProductDto>, ApiError> {
    let moved = view.navigate_products(
        nav,
        inventory.products(),
        inventory.settings().low_stock_threshold,
    );
    if moved {
        info!(page = view.pages().products, "Products page changed");
    }
    list_products(inventory, view)
}
