//! Products server binary: parses configuration, wires the request pipeline
//! and serves it over HTTP until Ctrl-C.

use std::sync::Arc;

use clap::Parser;
use products_core::SystemClock;
use products_server::api::ProductApi;
use products_server::logging::init_logging;
use products_server::network::NetworkModule;
use products_server::service::middleware::MetricsLayer;
use products_server::service::probe::TracingProbe;
use products_server::service::resolver::{CreateProductGraph, OperationResolver};
use products_server::service::ServerConfig;
use products_server::storage::build_client;
use tower::Layer;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level, config.log_format)?;

    let client = build_client(&config.storage())?;
    let probe = Arc::new(TracingProbe);
    let graph = CreateProductGraph::wire(
        client,
        config.config_provider(),
        Arc::new(SystemClock),
        probe.clone(),
    );
    let resolver = Arc::new(OperationResolver::new(graph, probe));
    let api = MetricsLayer.layer(ProductApi::new(resolver));

    let mut network = NetworkModule::new(config.network(), api);
    let port = network.start().await?;
    info!(port, engine = ?config.storage_engine, "Products server listening");

    network
        .serve(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Failed to listen for Ctrl-C");
            }
            info!("Shutdown signal received");
        })
        .await
}
