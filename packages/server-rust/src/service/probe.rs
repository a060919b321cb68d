//! Observability probe: a fire-and-forget sink for pipeline events.
//!
//! Probe calls never return errors and never influence control flow.

use products_core::{ProductDto, Request};
use tracing::{info, warn};

use super::validation::{CreateArgs, ValidationError};
use crate::storage::PersistenceError;

/// Fixed event names emitted by the pipeline.
pub mod events {
    pub const INVALID_REQUEST_RECEIVED: &str = "invalidRequestReceived";
    pub const VALID_REQUEST_RECEIVED: &str = "validRequestReceived";
    pub const ARGS_VALIDATION_SUCCEEDED: &str = "argsValidationSucceeded";
    pub const ARGS_VALIDATION_FAILED: &str = "argsValidationFailed";
    pub const SAVING_PRODUCT_SUCCEEDED: &str = "savingProductToDynamoSucceeded";
    pub const SAVING_PRODUCT_FAILED: &str = "savingProductToDynamoFailed";
}

/// Event sink for pipeline milestones.
pub trait Probe: Send + Sync {
    fn invalid_request_received(&self, request: &Request);

    fn valid_request_received(&self, request: &Request);

    fn args_validation_succeeded(&self, args: &CreateArgs);

    fn args_validation_failed(&self, error: &ValidationError);

    fn saving_product_succeeded(&self, product: &ProductDto);

    fn saving_product_failed(&self, error: &PersistenceError);
}

/// Probe that emits each event as a structured `tracing` event.
///
/// The `event` field carries the fixed event name so log pipelines can
/// filter on it regardless of the human-readable message.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProbe;

impl Probe for TracingProbe {
    fn invalid_request_received(&self, request: &Request) {
        warn!(
            event = events::INVALID_REQUEST_RECEIVED,
            method = %request.method,
            "invalid request received"
        );
    }

    fn valid_request_received(&self, request: &Request) {
        info!(
            event = events::VALID_REQUEST_RECEIVED,
            method = %request.method,
            body_len = request.body.len(),
            "valid request received"
        );
    }

    fn args_validation_succeeded(&self, args: &CreateArgs) {
        info!(
            event = events::ARGS_VALIDATION_SUCCEEDED,
            name = args.name(),
            "args validation succeeded"
        );
    }

    fn args_validation_failed(&self, error: &ValidationError) {
        warn!(
            event = events::ARGS_VALIDATION_FAILED,
            error = %error,
            "args validation failed"
        );
    }

    fn saving_product_succeeded(&self, product: &ProductDto) {
        info!(
            event = events::SAVING_PRODUCT_SUCCEEDED,
            product_id = %product.id,
            "saving product succeeded"
        );
    }

    fn saving_product_failed(&self, error: &PersistenceError) {
        warn!(
            event = events::SAVING_PRODUCT_FAILED,
            error = %error,
            "saving product failed"
        );
    }
}
