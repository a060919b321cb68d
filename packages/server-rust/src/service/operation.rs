//! Operation types: the resolved unit of work for one request.
//!
//! An [`Operation`] is a closed set of variants. Each variant owns the
//! collaborators it needs and is consumed exactly once by [`Operation::exec`].

use std::sync::Arc;

use products_core::{ProductDto, Request};

use super::handler::Handler;
use super::probe::Probe;
use super::validation::{ValidationError, Validator};

/// Boxed error used as the cause of a [`ServiceError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Fixed message carried by every [`InvalidOperationError`].
pub const INVALID_OPERATION_MESSAGE: &str = "Invalid operation";

// ---------------------------------------------------------------------------
// Operation
// ---------------------------------------------------------------------------

/// Typed operation variants produced by the resolver.
///
/// Dispatch sites must match exhaustively so adding a variant is a
/// compile-time change.
pub enum Operation {
    /// A supported request, wired with its validation and handling graph.
    Valid(ValidOperation),
    /// An unsupported request. Always fails.
    Invalid(InvalidOperation),
}

impl Operation {
    /// Runs the operation against `request`.
    ///
    /// # Errors
    ///
    /// - `OperationError::InvalidOperation` for the `Invalid` variant
    /// - `OperationError::Validation` when the payload fails validation
    /// - `OperationError::Service` when the handler fails
    pub async fn exec(self, request: &Request) -> Result<OperationResponse, OperationError> {
        match self {
            Self::Valid(op) => op.exec(request).await,
            Self::Invalid(op) => Err(op.exec(request).into()),
        }
    }

    /// Returns `true` for the `Valid` variant.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

impl std::fmt::Debug for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Valid(_) => f.write_str("Operation::Valid"),
            Self::Invalid(_) => f.write_str("Operation::Invalid"),
        }
    }
}

/// The create-product operation with its wired collaborators.
pub struct ValidOperation {
    validator: Arc<dyn Validator>,
    handler: Arc<dyn Handler>,
    probe: Arc<dyn Probe>,
}

impl ValidOperation {
    /// Creates the operation from already-built collaborators.
    #[must_use]
    pub fn new(
        validator: Arc<dyn Validator>,
        handler: Arc<dyn Handler>,
        probe: Arc<dyn Probe>,
    ) -> Self {
        Self {
            validator,
            handler,
            probe,
        }
    }

    /// Validates the request and hands the arguments to the handler.
    ///
    /// A validation failure is returned as-is. A handler failure is wrapped
    /// in a fresh [`ServiceError`] so the boundary always exposes one shape.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::Validation` or `OperationError::Service`.
    pub async fn exec(self, request: &Request) -> Result<OperationResponse, OperationError> {
        self.probe.valid_request_received(request);

        let args = match self.validator.validate(request) {
            Ok(args) => {
                self.probe.args_validation_succeeded(&args);
                args
            }
            Err(err) => {
                self.probe.args_validation_failed(&err);
                return Err(err.into());
            }
        };

        self.handler
            .exec(args)
            .await
            .map_err(|err| ServiceError::new(err).into())
    }
}

/// The fallback operation for unsupported methods.
pub struct InvalidOperation {
    probe: Arc<dyn Probe>,
}

impl InvalidOperation {
    /// Creates the operation. It depends on nothing but the probe.
    #[must_use]
    pub fn new(probe: Arc<dyn Probe>) -> Self {
        Self { probe }
    }

    /// Reports the request and returns the fixed failure.
    #[must_use]
    pub fn exec(self, request: &Request) -> InvalidOperationError {
        self.probe.invalid_request_received(request);
        InvalidOperationError::new(&request.method)
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Successful response payload from an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResponse {
    /// A product was created and persisted.
    Created(ProductDto),
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that may cross the operation boundary. The set is closed.
#[derive(Debug, thiserror::Error)]
pub enum OperationError {
    #[error(transparent)]
    InvalidOperation(#[from] InvalidOperationError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl OperationError {
    /// Stable tag naming the error kind, used in response bodies.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidOperation(_) => "InvalidOperationError",
            Self::Validation(_) => "ValidationError",
            Self::Service(_) => "ServiceError",
        }
    }
}

/// The request method does not map to any supported operation.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct InvalidOperationError {
    message: &'static str,
    method: String,
}

impl InvalidOperationError {
    /// Creates the error for the rejected `method`.
    #[must_use]
    pub fn new(method: &str) -> Self {
        Self {
            message: INVALID_OPERATION_MESSAGE,
            method: method.to_string(),
        }
    }

    /// The method token that was rejected.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }
}

/// A downstream failure (handler, domain service, or persistence).
#[derive(Debug, thiserror::Error)]
#[error("service error: {source}")]
pub struct ServiceError {
    source: BoxError,
}

impl ServiceError {
    /// Wraps `cause` as a service error.
    pub fn new(cause: impl Into<BoxError>) -> Self {
        Self {
            source: cause.into(),
        }
    }

    /// The wrapped cause.
    #[must_use]
    pub fn cause(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.source.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
