//! Persistence gateway for products.
//!
//! Translates between [`ProductDto`] and storage items and performs single
//! create/get calls. The table name is looked up on every call so the same
//! gateway can be pointed at different tables through configuration.

use std::sync::Arc;

use async_trait::async_trait;
use products_core::{ClockSource, ConfigProvider, ProductDto, PRODUCTS_TABLE_NAME};
use tracing::debug;

use super::client::StorageClient;
use super::mapper::{MapperError, ProductMapper};

/// Errors returned by the persistence gateway.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("missing configuration value {name}")]
    MissingConfig { name: &'static str },
    #[error("product {id} not found")]
    NotFound { id: String },
    #[error("stored item is malformed: {0}")]
    Mapping(#[from] MapperError),
    #[error("storage failure: {0}")]
    Storage(#[source] anyhow::Error),
}

/// Product persistence operations.
#[async_trait]
pub trait ProductGateway: Send + Sync {
    /// Persists a product with a single put.
    ///
    /// # Errors
    ///
    /// - `PersistenceError::MissingConfig` if the table name is not configured
    /// - `PersistenceError::Storage` if the storage client fails
    async fn create(&self, product: &ProductDto) -> Result<(), PersistenceError>;

    /// Loads a product by id with a single point read.
    ///
    /// # Errors
    ///
    /// - `PersistenceError::MissingConfig` if the table name is not configured
    /// - `PersistenceError::NotFound` if no item exists for `product_id`
    /// - `PersistenceError::Mapping` if the stored item is malformed
    /// - `PersistenceError::Storage` if the storage client fails
    async fn get(&self, product_id: &str) -> Result<ProductDto, PersistenceError>;
}

/// Gateway over a [`StorageClient`].
pub struct StorageProductGateway {
    client: Arc<dyn StorageClient>,
    mapper: Arc<dyn ProductMapper>,
    config: Arc<dyn ConfigProvider>,
    clock: Arc<dyn ClockSource>,
}

impl StorageProductGateway {
    #[must_use]
    pub fn new(
        client: Arc<dyn StorageClient>,
        mapper: Arc<dyn ProductMapper>,
        config: Arc<dyn ConfigProvider>,
        clock: Arc<dyn ClockSource>,
    ) -> Self {
        Self {
            client,
            mapper,
            config,
            clock,
        }
    }

    fn table_name(&self) -> Result<String, PersistenceError> {
        self.config
            .get(PRODUCTS_TABLE_NAME)
            .ok_or(PersistenceError::MissingConfig {
                name: PRODUCTS_TABLE_NAME,
            })
    }
}

#[async_trait]
impl ProductGateway for StorageProductGateway {
    async fn create(&self, product: &ProductDto) -> Result<(), PersistenceError> {
        let table = self.table_name()?;
        let item = self.mapper.to_item(product);

        self.client
            .put(&table, item)
            .await
            .map_err(PersistenceError::Storage)?;

        debug!(table = %table, product_id = %product.id, "product stored");
        Ok(())
    }

    async fn get(&self, product_id: &str) -> Result<ProductDto, PersistenceError> {
        let table = self.table_name()?;

        let item = self
            .client
            .get(&table, product_id)
            .await
            .map_err(PersistenceError::Storage)?
            .ok_or_else(|| PersistenceError::NotFound {
                id: product_id.to_string(),
            })?;

        Ok(self.mapper.from_item(&item, self.clock.now())?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use products_core::{Item, ManualClock, MapConfigProvider, ProductAttributes, Value};

    use super::*;
    use crate::storage::engines::MemoryStorageClient;
    use crate::storage::ProductItemMapper;

    const NOW: u64 = 1_700_000_000_000;

    fn product() -> ProductDto {
        ProductDto::new(
            ProductAttributes {
                description: "bar".to_string(),
                name: "baz".to_string(),
                price: "9.99".to_string(),
            },
            "qux",
            NOW - 60_000,
        )
    }

    fn gateway(
        client: &Arc<MemoryStorageClient>,
        config: MapConfigProvider,
    ) -> StorageProductGateway {
        StorageProductGateway::new(
            client.clone(),
            Arc::new(ProductItemMapper),
            Arc::new(config),
            Arc::new(ManualClock::new(NOW)),
        )
    }

    fn configured() -> MapConfigProvider {
        MapConfigProvider::new().with(PRODUCTS_TABLE_NAME, "foo")
    }

    #[tokio::test]
    async fn create_saves_into_configured_table() {
        let client = Arc::new(MemoryStorageClient::new());
        gateway(&client, configured())
            .create(&product())
            .await
            .unwrap();

        assert!(client.get("foo", "qux").await.unwrap().is_some());
        assert!(client.get("other", "qux").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_then_get_returns_equal_product() {
        let client = Arc::new(MemoryStorageClient::new());
        let gw = gateway(&client, configured());

        gw.create(&product()).await.unwrap();
        assert_eq!(gw.get("qux").await.unwrap(), product());
    }

    #[tokio::test]
    async fn table_name_is_resolved_per_call() {
        let client = Arc::new(MemoryStorageClient::new());
        gateway(&client, MapConfigProvider::new().with(PRODUCTS_TABLE_NAME, "a"))
            .create(&product())
            .await
            .unwrap();
        gateway(&client, MapConfigProvider::new().with(PRODUCTS_TABLE_NAME, "b"))
            .create(&product())
            .await
            .unwrap();

        assert_eq!(client.item_count(), 2);
    }

    #[tokio::test]
    async fn get_synthesizes_timestamp_when_absent() {
        let client = Arc::new(MemoryStorageClient::new());
        let mut item = Item::new();
        item.insert("id".to_string(), Value::from("bar"));
        item.insert("name".to_string(), Value::from("baz"));
        item.insert("description".to_string(), Value::from("foo"));
        item.insert("price".to_string(), Value::from("9.99"));
        client.insert_raw("foo", "bar", item);

        let dto = gateway(&client, configured()).get("bar").await.unwrap();

        assert_eq!(
            dto,
            ProductDto::new(
                ProductAttributes {
                    description: "foo".to_string(),
                    name: "baz".to_string(),
                    price: "9.99".to_string(),
                },
                "bar",
                NOW,
            )
        );
    }

    #[tokio::test]
    async fn missing_table_config_fails_both_calls() {
        let client = Arc::new(MemoryStorageClient::new());
        let gw = gateway(&client, MapConfigProvider::new());

        assert!(matches!(
            gw.create(&product()).await,
            Err(PersistenceError::MissingConfig {
                name: PRODUCTS_TABLE_NAME
            })
        ));
        assert!(matches!(
            gw.get("qux").await,
            Err(PersistenceError::MissingConfig { .. })
        ));
        assert_eq!(client.item_count(), 0);
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let client = Arc::new(MemoryStorageClient::new());
        let err = gateway(&client, configured()).get("nope").await.unwrap_err();
        assert!(matches!(err, PersistenceError::NotFound { id } if id == "nope"));
    }

    #[tokio::test]
    async fn malformed_item_is_mapping_error() {
        let client = Arc::new(MemoryStorageClient::new());
        let mut item = Item::new();
        item.insert("id".to_string(), Value::from("bad"));
        client.insert_raw("foo", "bad", item);

        let err = gateway(&client, configured()).get("bad").await.unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::Mapping(MapperError::MissingAttribute(_))
        ));
    }
}
