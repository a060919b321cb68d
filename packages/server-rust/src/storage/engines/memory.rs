//! In-memory [`StorageClient`] backed by [`DashMap`].
//!
//! Concurrent reads and writes need no external locking. Suitable for
//! development and tests; contents are lost when the process exits.

use async_trait::async_trait;
use dashmap::DashMap;
use products_core::Item;

use crate::storage::client::{item_key, StorageClient};

/// In-memory storage keyed by `(table, key)`.
#[derive(Debug, Default)]
pub struct MemoryStorageClient {
    entries: DashMap<(String, String), Item>,
}

impl MemoryStorageClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items across all tables.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.entries.len()
    }

    /// Writes `item` under `key` without deriving the key from the item.
    ///
    /// Lets tests seed items whose shape the gateway would never produce.
    pub fn insert_raw(&self, table: &str, key: &str, item: Item) {
        self.entries
            .insert((table.to_string(), key.to_string()), item);
    }
}

#[async_trait]
impl StorageClient for MemoryStorageClient {
    async fn put(&self, table: &str, item: Item) -> anyhow::Result<()> {
        let key = item_key(&item)?.to_string();
        self.entries.insert((table.to_string(), key), item);
        Ok(())
    }

    async fn get(&self, table: &str, key: &str) -> anyhow::Result<Option<Item>> {
        Ok(self
            .entries
            .get(&(table.to_string(), key.to_string()))
            .map(|entry| entry.value().clone()))
    }
}
