//! Command handlers: the thin seam between operations and domain services.

use std::sync::Arc;

use async_trait::async_trait;

use super::domain::ProductService;
use super::operation::{OperationResponse, ServiceError};
use super::validation::CreateArgs;

/// Executes a validated command.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs the command.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` wrapping any downstream failure.
    async fn exec(&self, args: CreateArgs) -> Result<OperationResponse, ServiceError>;
}

/// Handler for the create-product command.
pub struct CreateHandler {
    service: Arc<dyn ProductService>,
}

impl CreateHandler {
    #[must_use]
    pub fn new(service: Arc<dyn ProductService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Handler for CreateHandler {
    async fn exec(&self, args: CreateArgs) -> Result<OperationResponse, ServiceError> {
        self.service
            .create(args)
            .await
            .map(OperationResponse::Created)
            .map_err(ServiceError::new)
    }
}
