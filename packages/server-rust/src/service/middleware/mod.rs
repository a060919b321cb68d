//! Tower middleware layers for the product request pipeline.
//!
//! - [`metrics`]: request timing and status via `tracing` spans

pub mod metrics;

pub use metrics::{MetricsLayer, MetricsService};
