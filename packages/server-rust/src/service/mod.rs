//! Product request pipeline.
//!
//! 1. **Resolution** (`resolver`): `Request` -> `Operation` (`Valid` or `Invalid`)
//! 2. **Validation** (`validation`): raw body -> `CreateArgs`
//! 3. **Handling** (`handler`): `CreateArgs` -> domain service call
//! 4. **Domain service** (`domain`): id and timestamp assignment, persistence
//! 5. **Observability** (`probe`, `middleware`): fixed-name events and request spans

pub mod config;
pub mod domain;
pub mod handler;
pub mod middleware;
pub mod operation;
pub mod probe;
pub mod resolver;
pub mod validation;

pub use config::ServerConfig;
pub use domain::{DefaultProductService, ProductService, ProductServiceError};
pub use handler::{CreateHandler, Handler};
pub use operation::{
    InvalidOperation, InvalidOperationError, Operation, OperationError, OperationResponse,
    ServiceError, ValidOperation,
};
pub use probe::{Probe, TracingProbe};
pub use resolver::{CreateProductGraph, OperationResolver};
pub use validation::{CreateArgs, CreateArgsValidator, ValidationCause, ValidationError, Validator};
