//! HTTP handler definitions for the products server.
//!
//! This module defines `AppState` (the shared state carried through axum
//! extractors) and re-exports all handler functions for building the router.

pub mod health;
pub mod products;

pub use health::{health_handler, liveness_handler, readiness_handler};
pub use products::products_handler;

use std::sync::Arc;
use std::time::Instant;

use super::ShutdownController;
use crate::api::ProductApi;
use crate::service::middleware::MetricsService;

/// Product API wrapped in the request metrics layer.
pub type ProductPipeline = MetricsService<ProductApi>;

/// Shared application state passed to all axum handlers via `State` extraction.
///
/// Holds `Arc` references and cheap clones, so cloning per request is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Product request pipeline behind `/products`.
    pub api: ProductPipeline,
    /// Health state and in-flight product request tracking.
    pub shutdown: Arc<ShutdownController>,
    /// Server process start time, used for uptime calculation.
    pub start_time: Instant,
}
