//! # Stockroom Back Office Library
//!
//! Application layer for the Stockroom inventory back office. Wires the
//! configuration, logging and store together and exposes the commands the
//! browser frontend calls.
//!
//! ## Module Organization
//! ```text
//! stockroom_backoffice/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── inventory.rs◄─── Collections + repository
//! │   ├── view.rs     ◄─── Filters and current pages
//! │   └── config.rs   ◄─── stockroom.toml + STOCKROOM_* env
//! ├── commands/
//! │   ├── mod.rs      ◄─── PageDto
//! │   ├── product.rs  ◄─── Products table and CRUD
//! │   ├── supplier.rs ◄─── Suppliers table and CRUD
//! │   ├── category.rs ◄─── Category list and chart
//! │   ├── settings.rs ◄─── Settings singleton
//! │   └── dashboard.rs◄─── Dashboard cards
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod state;

use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use commands::dashboard::{get_dashboard, DashboardDto};
use commands::product::{list_products, ProductDto};
use commands::PageDto;
use error::AppResult;
use state::{AppConfig, InventoryState, ViewState};
use stockroom_core::CategoryCount;
use stockroom_store::{InventoryRepository, KeyValueStore, SqliteStore, StoreConfig};

/// What the back office shows right after startup.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupReport {
    pub dashboard: DashboardDto,
    pub categories: Vec<CategoryCount>,
    pub products: PageDto<ProductDto>,
}

impl StartupReport {
    /// Builds the first screen: dashboard cards, category chart and the
    /// first page of products with no filter applied.
    pub fn build<S: KeyValueStore>(inventory: &InventoryState<S>) -> AppResult<Self> {
        let mut view = ViewState::new();
        let products = list_products(inventory, &mut view)?;
        let dashboard = get_dashboard(inventory)?;

        Ok(StartupReport {
            dashboard,
            categories: inventory.category_counts(),
            products,
        })
    }
}

/// Runs the back office.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → stockroom.toml → STOCKROOM_* env                       │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • RUST_LOG wins, else [logging].filter                              │
/// │                                                                         │
/// │  3. Open Store ───────────────────────────────────────────────────────► │
/// │     • SQLite with WAL mode, pending migrations applied                  │
/// │                                                                         │
/// │  4. Load Inventory ───────────────────────────────────────────────────► │
/// │     • products, suppliers, categories, settings                         │
/// │     • bad or missing documents fall back to defaults                    │
/// │                                                                         │
/// │  5. Print Startup Report ─────────────────────────────────────────────► │
/// │     • dashboard, category chart, first products page as JSON            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(config_path: Option<PathBuf>) -> AppResult<()> {
    let config = AppConfig::load(config_path)?;
    init_tracing(&config.logging.filter);

    info!("Starting Stockroom back office");

    let db_path = config.database_path()?;
    info!(?db_path, "Database path determined");

    let store = SqliteStore::new(
        StoreConfig::new(db_path).max_connections(config.store.max_connections),
    )
    .await?;

    if !store.health_check().await {
        warn!("Store health check failed");
    }

    let repo = InventoryRepository::new(store.clone());
    let inventory = InventoryState::load(repo, config.inventory.seed_default_categories).await?;
    info!(
        products = inventory.products().len(),
        suppliers = inventory.suppliers().len(),
        "Inventory loaded"
    );

    let report = StartupReport::build(&inventory)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    store.close().await;
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=stockroom=trace` - Show trace for stockroom crates only
/// - Default: the `[logging].filter` config value
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A subscriber may already be installed (tests, embedding)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
