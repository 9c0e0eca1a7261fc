//! # State Module
//!
//! Application state for the back office.
//!
//! Instead of one struct holding everything, each concern is its own type
//! and commands take only what they need.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐   │
//! │  │ InventoryState<S>│ │    ViewState     │ │      AppConfig       │   │
//! │  │                  │ │                  │ │                      │   │
//! │  │  • products      │ │  • filters       │ │  • store path        │   │
//! │  │  • suppliers     │ │  • current pages │ │  • log filter        │   │
//! │  │  • categories    │ │                  │ │  • seed categories   │   │
//! │  │  • settings      │ │                  │ │                      │   │
//! │  │  • repository    │ │                  │ │                      │   │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘   │
//! │                                                                         │
//! │  OWNERSHIP:                                                            │
//! │  • InventoryState: mutated through &mut, persisted after each change   │
//! │  • ViewState: pure in-memory, never persisted                          │
//! │  • AppConfig: read-only after startup                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod inventory;
mod view;

pub use config::{AppConfig, InventorySettings, LoggingSettings, StoreSettings, DEFAULT_LOG_FILTER};
pub use inventory::{InventoryState, ProductInput, SupplierInput};
pub use view::ViewState;

#[cfg(test)]
pub(crate) use inventory::tests as fixtures;
