//! # Settings Commands
//!
//! Read and replace the settings singleton. A new low stock threshold
//! takes effect on the next table render and dashboard read; nothing is
//! cached.

use tracing::debug;

use crate::error::ApiError;
use crate::state::InventoryState;
use stockroom_core::Settings;
use stockroom_store::KeyValueStore;

pub fn get_settings<S: KeyValueStore>(inventory: &InventoryState<S>) -> Result<Settings, ApiError> {
    Ok(inventory.settings().clone())
}

/// Saves the settings form. Returns the normalized values.
pub async fn save_settings<S: KeyValueStore>(
    inventory: &mut InventoryState<S>,
    settings: Settings,
) -> Result<Settings, ApiError> {
    debug!(
        company = %settings.company_name,
        threshold = settings.low_stock_threshold,
        "save_settings command"
    );
    Ok(inventory.save_settings(settings).await?.clone())
}

pub async fn set_auto_backup<S: KeyValueStore>(
    inventory: &mut InventoryState<S>,
    enabled: bool,
) -> Result<Settings, ApiError> {
    debug!(enabled, "set_auto_backup command");
    Ok(inventory.set_auto_backup(enabled).await?.clone())
}
