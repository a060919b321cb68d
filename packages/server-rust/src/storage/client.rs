//! Key-value storage client trait.
//!
//! The client is the only component that talks to a storage engine. It
//! stores [`Item`]s in named tables, keyed by the item's `id` attribute.

use async_trait::async_trait;
use products_core::Item;

/// Attribute holding an item's primary key.
pub const KEY_ATTRIBUTE: &str = "id";

/// Pluggable key-value storage engine.
///
/// Each call is a single atomic read or write. Implementations own any
/// retry behaviour; callers never retry.
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Writes `item` to `table`, replacing any item with the same key.
    ///
    /// # Errors
    ///
    /// Returns an error if the item has no string `id` attribute or the
    /// engine rejects the write.
    async fn put(&self, table: &str, item: Item) -> anyhow::Result<()>;

    /// Reads the item stored under `key` in `table`.
    ///
    /// Returns `None` if the key or the table does not exist.
    async fn get(&self, table: &str, key: &str) -> anyhow::Result<Option<Item>>;
}

/// Extracts the primary key from an item.
///
/// # Errors
///
/// Returns an error if the `id` attribute is missing or not a string.
pub fn item_key(item: &Item) -> anyhow::Result<&str> {
    item.get(KEY_ATTRIBUTE)
        .and_then(products_core::Value::as_str)
        .ok_or_else(|| anyhow::anyhow!("item has no string `{KEY_ATTRIBUTE}` attribute"))
}
