//! Operation resolution: converts a raw `Request` into a typed `Operation`.

use std::sync::Arc;

use products_core::{ClockSource, ConfigProvider, Request};

use super::domain::DefaultProductService;
use super::handler::{CreateHandler, Handler};
use super::operation::{InvalidOperation, Operation, ValidOperation};
use super::probe::Probe;
use super::validation::{CreateArgsValidator, Validator};
use crate::storage::{ProductItemMapper, StorageClient, StorageProductGateway};

/// Method tokens that map to supported operations.
pub mod methods {
    /// Creates a product.
    pub const CREATE: &str = "POST";
}

// ---------------------------------------------------------------------------
// CreateProductGraph
// ---------------------------------------------------------------------------

/// Collaborators of the create-product operation, wired once.
///
/// The graph is an immutable template: each resolved `Operation` clones the
/// `Arc` handles, so nothing is rebuilt per request.
#[derive(Clone)]
pub struct CreateProductGraph {
    validator: Arc<dyn Validator>,
    handler: Arc<dyn Handler>,
}

impl CreateProductGraph {
    /// Creates a graph from an explicit validator and handler.
    #[must_use]
    pub fn new(validator: Arc<dyn Validator>, handler: Arc<dyn Handler>) -> Self {
        Self { validator, handler }
    }

    /// Wires the production graph:
    /// validator, handler, service, gateway, mapper, storage client.
    #[must_use]
    pub fn wire(
        client: Arc<dyn StorageClient>,
        config: Arc<dyn ConfigProvider>,
        clock: Arc<dyn ClockSource>,
        probe: Arc<dyn Probe>,
    ) -> Self {
        let gateway = Arc::new(StorageProductGateway::new(
            client,
            Arc::new(ProductItemMapper),
            config,
            Arc::clone(&clock),
        ));
        let service = Arc::new(DefaultProductService::new(gateway, clock, probe));
        Self::new(
            Arc::new(CreateArgsValidator::new()),
            Arc::new(CreateHandler::new(service)),
        )
    }
}

// ---------------------------------------------------------------------------
// OperationResolver
// ---------------------------------------------------------------------------

/// Classifies requests into operations.
///
/// Resolution is pure and total: every method token yields exactly one
/// variant, with `Invalid` covering everything unsupported.
#[derive(Clone)]
pub struct OperationResolver {
    create: CreateProductGraph,
    probe: Arc<dyn Probe>,
}

impl OperationResolver {
    /// Builds a resolver over a wired create graph. `probe` is shared by
    /// every operation it resolves.
    #[must_use]
    pub fn new(create: CreateProductGraph, probe: Arc<dyn Probe>) -> Self {
        Self { create, probe }
    }

    /// Resolves `request` to its operation.
    #[must_use]
    pub fn resolve(&self, request: &Request) -> Operation {
        match request.method.as_str() {
            methods::CREATE => Operation::Valid(ValidOperation::new(
                Arc::clone(&self.create.validator),
                Arc::clone(&self.create.handler),
                Arc::clone(&self.probe),
            )),
            _ => Operation::Invalid(InvalidOperation::new(Arc::clone(&self.probe))),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
