//! Products Server — product request pipeline, persistence gateway, OAuth
//! token gateway and the axum transport in front of them.
//!
//! A request flows resolver -> operation -> validator -> handler -> domain
//! service -> persistence gateway -> storage client, and its outcome is
//! mapped to an HTTP response by [`api::ApiResponse`].

pub mod api;
pub mod logging;
pub mod network;
pub mod oauth;
pub mod service;
pub mod storage;

#[cfg(test)]
mod test_support;

pub use api::{ApiResponse, ProductApi};
pub use service::{Operation, OperationError, OperationResolver, OperationResponse};
