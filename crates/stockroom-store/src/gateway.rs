//! # Store Gateway
//!
//! The opaque key-value store the inventory is mirrored to.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load(key)        → Some(JSON) | None (never written)                  │
//! │  save(key, JSON)  → replaces the whole document under key              │
//! │                                                                         │
//! │  Keys in use:  products │ suppliers │ categories │ settings            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A store knows nothing about products or settings. It persists JSON
//! documents as text and hands them back parsed; text that no longer parses
//! comes back as [`StoreError::Serialization`](crate::StoreError).

use serde_json::Value;
use std::fmt;
use std::future::Future;

use crate::error::StoreResult;

// =============================================================================
// Storage Keys
// =============================================================================

/// The four documents the inventory is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Products,
    Suppliers,
    Categories,
    Settings,
}

impl StorageKey {
    pub const ALL: [StorageKey; 4] = [
        StorageKey::Products,
        StorageKey::Suppliers,
        StorageKey::Categories,
        StorageKey::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Products => "products",
            StorageKey::Suppliers => "suppliers",
            StorageKey::Categories => "categories",
            StorageKey::Settings => "settings",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Key-Value Store Trait
// =============================================================================

/// A persistent key-value store of JSON documents.
///
/// Implementations write with `async fn`; both futures must be `Send` so
/// the store can be driven from a multi-threaded runtime.
pub trait KeyValueStore {
    /// Reads the document stored under `key`, or `None` if it was never saved.
    fn load(&self, key: &str) -> impl Future<Output = StoreResult<Option<Value>>> + Send;

    /// Replaces the document stored under `key`.
    fn save(&self, key: &str, value: &Value) -> impl Future<Output = StoreResult<()>> + Send;
}
