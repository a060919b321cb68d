//! Product domain service.
//!
//! Assigns identity and creation time to new products and persists them
//! through the [`ProductGateway`]. Probe events report the save outcome.

use std::sync::Arc;

use async_trait::async_trait;
use products_core::{ClockSource, ProductDto};
use uuid::Uuid;

use crate::service::probe::Probe;
use crate::service::validation::CreateArgs;
use crate::storage::{PersistenceError, ProductGateway};

/// Errors from the product domain service.
#[derive(Debug, thiserror::Error)]
pub enum ProductServiceError {
    #[error("failed to save product: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Domain operations on products.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Creates and persists a product from validated arguments.
    ///
    /// # Errors
    ///
    /// Returns `ProductServiceError::Persistence` if the product cannot be saved.
    async fn create(&self, args: CreateArgs) -> Result<ProductDto, ProductServiceError>;
}

/// Default product service backed by a gateway.
pub struct DefaultProductService {
    gateway: Arc<dyn ProductGateway>,
    clock: Arc<dyn ClockSource>,
    probe: Arc<dyn Probe>,
}

impl DefaultProductService {
    #[must_use]
    pub fn new(
        gateway: Arc<dyn ProductGateway>,
        clock: Arc<dyn ClockSource>,
        probe: Arc<dyn Probe>,
    ) -> Self {
        Self {
            gateway,
            clock,
            probe,
        }
    }
}

#[async_trait]
impl ProductService for DefaultProductService {
    async fn create(&self, args: CreateArgs) -> Result<ProductDto, ProductServiceError> {
        let product = ProductDto::new(
            args.into_attributes(),
            Uuid::new_v4().to_string(),
            self.clock.now(),
        );

        match self.gateway.create(&product).await {
            Ok(()) => {
                self.probe.saving_product_succeeded(&product);
                Ok(product)
            }
            Err(err) => {
                self.probe.saving_product_failed(&err);
                Err(err.into())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
