//! # In-Memory Store
//!
//! A [`KeyValueStore`] backed by a `HashMap`, used by tests and by the
//! backoffice when no database path is configured.
//!
//! Documents are kept as JSON text, the same way the SQLite store keeps
//! them, so malformed stored data can be reproduced with
//! [`MemoryStore::insert_raw`].

use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::gateway::KeyValueStore;

/// Shared in-memory store. Clones see the same documents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    fn entries(&self) -> StoreResult<MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Internal("memory store lock poisoned".to_string()))
    }

    /// Stores raw text under `key` without checking that it is JSON.
    pub fn insert_raw(&self, key: &str, text: impl Into<String>) -> StoreResult<()> {
        self.entries()?.insert(key.to_string(), text.into());
        Ok(())
    }

    /// Raw text stored under `key`.
    pub fn raw(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.entries()?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.entries()?.is_empty())
    }
}

impl KeyValueStore for MemoryStore {
    async fn load(&self, key: &str) -> StoreResult<Option<Value>> {
        debug!(key = %key, "Memory store load");

        let text = self.raw(key)?;
        match text {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, key: &str, value: &Value) -> StoreResult<()> {
        debug!(key = %key, "Memory store save");

        let text = serde_json::to_string(value)?;
        self.insert_raw(key, text)
    }
}
