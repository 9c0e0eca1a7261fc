//! # Category Commands
//!
//! The category list (dropdowns, settings screen) and the category chart.

use tracing::debug;

use crate::error::ApiError;
use crate::state::InventoryState;
use stockroom_core::CategoryCount;
use stockroom_store::KeyValueStore;

pub fn list_categories<S: KeyValueStore>(
    inventory: &InventoryState<S>,
) -> Result<Vec<String>, ApiError> {
    Ok(inventory.categories().as_slice().to_vec())
}

/// Adds a category and returns the updated list.
pub async fn add_category<S: KeyValueStore>(
    inventory: &mut InventoryState<S>,
    label: String,
) -> Result<Vec<String>, ApiError> {
    debug!(label = %label, "add_category command");
    inventory.add_category(&label).await?;
    list_categories(inventory)
}

/// Removes a category and returns the updated list.
///
/// Products still carrying the label keep it and stay visible under
/// `all`; they just no longer get a chart bar.
pub async fn remove_category<S: KeyValueStore>(
    inventory: &mut InventoryState<S>,
    label: String,
) -> Result<Vec<String>, ApiError> {
    debug!(label = %label, "remove_category command");
    inventory.remove_category(&label).await?;
    list_categories(inventory)
}

/// One bar per category, in list order, zeros included.
pub fn get_category_chart<S: KeyValueStore>(
    inventory: &InventoryState<S>,
) -> Result<Vec<CategoryCount>, ApiError> {
    Ok(inventory.category_counts())
}
