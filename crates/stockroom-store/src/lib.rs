//! # stockroom-store: Persistence Layer for Stockroom
//!
//! This crate mirrors the in-memory inventory to a key-value store of JSON
//! documents. SQLite (through sqlx) is the durable backend; an in-memory
//! backend serves tests.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Data Flow                              │
//! │                                                                         │
//! │  InventoryState mutation (create_product, add_category, ...)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  stockroom-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐   ┌───────────────┐   ┌──────────────┐   │   │
//! │  │   │ Inventory      │   │ KeyValueStore │   │  Migrations  │   │   │
//! │  │   │ Repository     │──►│   (trait)     │   │  (embedded)  │   │   │
//! │  │   │ typed decode   │   │ SqliteStore   │   │ 001_kv_store │   │   │
//! │  │   │ + fallbacks    │   │ MemoryStore   │   │              │   │   │
//! │  │   └────────────────┘   └───────────────┘   └──────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  SQLite: kv_store(key, value, updated_at)                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`gateway`] - The `KeyValueStore` trait and storage keys
//! - [`pool`] - SQLite pool configuration and `SqliteStore`
//! - [`memory`] - `MemoryStore` for tests
//! - [`migrations`] - Embedded database migrations
//! - [`repository`] - Typed load/save with fallback decoding
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockroom_store::{InventoryRepository, SqliteStore, StoreConfig};
//!
//! let store = SqliteStore::new(StoreConfig::new("./stockroom.db")).await?;
//! let repo = InventoryRepository::new(store);
//! let inventory = repo.load_all(true).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod gateway;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use gateway::{KeyValueStore, StorageKey};
pub use memory::MemoryStore;
pub use pool::{SqliteStore, StoreConfig};
pub use repository::{Inventory, InventoryRepository};
