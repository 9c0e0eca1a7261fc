//! # Supplier Commands
//!
//! The Suppliers table and supplier create / update / delete. Search
//! covers legal name, trade name and document; the type filter narrows to
//! individuals or companies.

use serde::Serialize;
use tracing::{debug, info};
use ts_rs::TS;

use super::PageDto;
use crate::error::ApiError;
use crate::state::{InventoryState, SupplierInput, ViewState};
use stockroom_core::validation::validate_search_query;
use stockroom_core::{DocumentType, DocumentTypeFilter, PageNav, Supplier};
use stockroom_store::KeyValueStore;

/// Supplier row as the frontend renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SupplierDto {
    pub id: String,
    pub legal_name: String,
    pub trade_name: Option<String>,
    /// Trade name when present, otherwise legal name.
    pub display_name: String,
    pub document: String,
    pub document_type: DocumentType,
    pub phone: String,
}

impl From<&Supplier> for SupplierDto {
    fn from(supplier: &Supplier) -> Self {
        SupplierDto {
            id: supplier.id.clone(),
            legal_name: supplier.legal_name.clone(),
            trade_name: supplier.trade_name.clone(),
            display_name: supplier.display_name().to_string(),
            document: supplier.document.clone(),
            document_type: supplier.document_type,
            phone: supplier.phone.clone(),
        }
    }
}

/// Current page of the Suppliers table.
pub fn list_suppliers<S: KeyValueStore>(
    inventory: &InventoryState<S>,
    view: &mut ViewState,
) -> Result<PageDto<SupplierDto>, ApiError> {
    let page = view
        .supplier_page(inventory.suppliers())
        .map(SupplierDto::from);

    debug!(
        page = page.meta.page,
        total = page.meta.total_items,
        "list_suppliers command"
    );

    Ok(page.into())
}

pub fn get_supplier<S: KeyValueStore>(
    inventory: &InventoryState<S>,
    id: String,
) -> Result<SupplierDto, ApiError> {
    debug!(id = %id, "get_supplier command");
    Ok(inventory.get_supplier(&id)?.into())
}

pub async fn create_supplier<S: KeyValueStore>(
    inventory: &mut InventoryState<S>,
    input: SupplierInput,
) -> Result<SupplierDto, ApiError> {
    debug!(document_type = %input.document_type, "create_supplier command");
    let supplier = inventory.create_supplier(input).await?;
    Ok((&supplier).into())
}

pub async fn update_supplier<S: KeyValueStore>(
    inventory: &mut InventoryState<S>,
    id: String,
    input: SupplierInput,
) -> Result<SupplierDto, ApiError> {
    debug!(id = %id, "update_supplier command");
    let supplier = inventory.update_supplier(&id, input).await?;
    Ok((&supplier).into())
}

/// Deletes a supplier and returns the refreshed table.
pub async fn delete_supplier<S: KeyValueStore>(
    inventory: &mut InventoryState<S>,
    view: &mut ViewState,
    id: String,
) -> Result<PageDto<SupplierDto>, ApiError> {
    debug!(id = %id, "delete_supplier command");
    inventory.delete_supplier(&id).await?;
    list_suppliers(inventory, view)
}

pub fn set_supplier_search<S: KeyValueStore>(
    inventory: &InventoryState<S>,
    view: &mut ViewState,
    query: String,
) -> Result<PageDto<SupplierDto>, ApiError> {
    let query = validate_search_query(&query)?;
    debug!(query = %query, "set_supplier_search command");
    view.set_supplier_search(query);
    list_suppliers(inventory, view)
}

/// `document_type` is one of `all`, `individual`, `company`.
pub fn set_document_type_filter<S: KeyValueStore>(
    inventory: &InventoryState<S>,
    view: &mut ViewState,
    document_type: String,
) -> Result<PageDto<SupplierDto>, ApiError> {
    let filter: DocumentTypeFilter = document_type.parse()?;
    debug!(filter = %filter, "set_document_type_filter command");
    view.set_document_type(filter);
    list_suppliers(inventory, view)
}

pub fn change_suppliers_page<S: KeyValueStore>(
    inventory: &InventoryState<S>,
    view: &mut ViewState,
    nav: PageNav,
) -> Result<PageDto<SupplierDto>, ApiError> {
    if view.navigate_suppliers(nav, inventory.suppliers()) {
        info!(page = view.pages().suppliers, "Suppliers page changed");
    }
    list_suppliers(inventory, view)
}
