//! # Key-Value Store
//!
//! The persistence seam: three operations over string keys and string values.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       KeyValueStore                                     │
//! │                                                                         │
//! │   get(key)        → Option<String>                                     │
//! │   set(key, value) → ()      whole-value overwrite                      │
//! │   delete(key)     → ()      missing key is not an error                │
//! │                                                                         │
//! │   ┌──────────────────────┐        ┌──────────────────────┐             │
//! │   │ Database (SQLite)    │        │ MemoryStore          │             │
//! │   │ kv_entries table     │        │ HashMap, for tests   │             │
//! │   └──────────────────────┘        └──────────────────────┘             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::error::{DbError, DbResult};

/// Durable string-keyed storage.
///
/// Writes are whole-value overwrites with no partial update and no retry.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> impl Future<Output = DbResult<Option<String>>> + Send;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = DbResult<()>> + Send;

    /// Removes `key`. Removing a missing key succeeds.
    fn delete(&self, key: &str) -> impl Future<Output = DbResult<()>> + Send;
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// A `KeyValueStore` held in memory.
///
/// Clones share the same map, so a clone handed to a repository sees the
/// writes made through another clone. `set_unavailable(true)` makes every
/// operation fail, for exercising storage-failure paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Creates a store pre-populated with `key = value`.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = MemoryStore::new();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        store
    }

    /// Makes every subsequent operation fail (or succeed again).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Whether `key` currently has a value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries
            .lock()
            .map(|entries| entries.contains_key(key))
            .unwrap_or(false)
    }

    fn entries(&self) -> DbResult<MutexGuard<'_, HashMap<String, String>>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DbError::Unavailable("memory store disabled".to_string()));
        }
        self.entries
            .lock()
            .map_err(|_| DbError::Internal("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key = %key, bytes = value.len(), "memory store set");
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> DbResult<()> {
        debug!(key = %key, "memory store delete");
        self.entries()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_delete() {
        let store = MemoryStore::new();
        assert_eq!(store.get("user").await.unwrap(), None);

        store.set("user", "{}").await.unwrap();
        assert_eq!(store.get("user").await.unwrap().as_deref(), Some("{}"));

        store.set("user", "[]").await.unwrap();
        assert_eq!(store.get("user").await.unwrap().as_deref(), Some("[]"));

        store.delete("user").await.unwrap();
        assert_eq!(store.get("user").await.unwrap(), None);

        store.delete("user").await.unwrap();
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let clone = store.clone();
        clone.set("products", "[]").await.unwrap();
        assert!(store.contains_key("products"));
    }

    #[tokio::test]
    async fn test_unavailable_store_fails() {
        let store = MemoryStore::with_entry("user", "{}");
        store.set_unavailable(true);

        assert!(matches!(store.get("user").await, Err(DbError::Unavailable(_))));
        assert!(matches!(store.set("user", "x").await, Err(DbError::Unavailable(_))));

        store.set_unavailable(false);
        assert_eq!(store.get("user").await.unwrap().as_deref(), Some("{}"));
    }
}
