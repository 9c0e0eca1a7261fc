//! # Dashboard Commands
//!
//! The four dashboard cards, recomputed from the in-memory collections on
//! every call.

use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::InventoryState;
use stockroom_store::KeyValueStore;

/// Dashboard cards as the frontend renders them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDto {
    pub company_name: String,
    pub total_products: usize,
    pub total_suppliers: usize,
    pub total_stock_value_cents: i64,
    /// Stock value in the configured currency, e.g. `R$ 42.00`.
    pub total_stock_value: String,
    pub low_stock_count: usize,
}

pub fn get_dashboard<S: KeyValueStore>(
    inventory: &InventoryState<S>,
) -> Result<DashboardDto, ApiError> {
    let settings = inventory.settings();
    let summary = inventory.dashboard();

    debug!(
        products = summary.total_products,
        low_stock = summary.low_stock_count,
        "get_dashboard command"
    );

    Ok(DashboardDto {
        company_name: settings.company_name.clone(),
        total_products: summary.total_products,
        total_suppliers: summary.total_suppliers,
        total_stock_value_cents: summary.total_stock_value.cents(),
        total_stock_value: settings.format_money(summary.total_stock_value),
        low_stock_count: summary.low_stock_count,
    })
}
