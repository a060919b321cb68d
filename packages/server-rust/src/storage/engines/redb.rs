//! Persistent [`StorageClient`] backed by a `redb` database file.
//!
//! Items are encoded with `MsgPack` (`rmp-serde`). Each storage table maps
//! to a redb table of the same name. redb is synchronous, so every call
//! runs on the blocking thread pool.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use products_core::Item;
use ::redb::{Database, ReadableTable, TableDefinition, TableError};

use crate::storage::client::{item_key, StorageClient};

/// Storage client persisting items to a single redb file.
pub struct RedbStorageClient {
    db: Arc<Database>,
}

impl RedbStorageClient {
    /// Opens (or creates) the database at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or is not a redb database.
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let db = Database::create(path)?;
        Ok(Self { db: Arc::new(db) })
    }
}

#[async_trait]
impl StorageClient for RedbStorageClient {
    async fn put(&self, table: &str, item: Item) -> anyhow::Result<()> {
        let key = item_key(&item)?.to_string();
        let bytes = rmp_serde::to_vec(&item)?;
        let db = Arc::clone(&self.db);
        let table = table.to_string();

        tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
            let definition: TableDefinition<&'static str, &'static [u8]> =
                TableDefinition::new(&table);
            let txn = db.begin_write()?;
            {
                let mut t = txn.open_table(definition)?;
                t.insert(key.as_str(), bytes.as_slice())?;
            }
            txn.commit()?;
            Ok(())
        })
        .await?
    }

    async fn get(&self, table: &str, key: &str) -> anyhow::Result<Option<Item>> {
        let db = Arc::clone(&self.db);
        let table = table.to_string();
        let key = key.to_string();

        tokio::task::spawn_blocking(move || -> anyhow::Result<Option<Item>> {
            let definition: TableDefinition<&'static str, &'static [u8]> =
                TableDefinition::new(&table);
            let txn = db.begin_read()?;
            let t = match txn.open_table(definition) {
                Ok(t) => t,
                // Nothing was ever written to this table.
                Err(TableError::TableDoesNotExist(_)) => return Ok(None),
                Err(e) => return Err(e.into()),
            };
            match t.get(key.as_str())? {
                Some(guard) => Ok(Some(rmp_serde::from_slice(guard.value())?)),
                None => Ok(None),
            }
        })
        .await?
    }
}
