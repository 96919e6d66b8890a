//! Azure Pricing Server
//!
//! This application exposes the Azure Retail Prices catalog as a small query
//! workflow over HTTP: list service families, resolve the service names of a
//! family, list its products, and compute the monthly cost of one product.
//!
//! # Architecture
//!
//! Every request runs its own pipeline against the live catalog:
//! - **Catalog**: paginated fetches with per-request retry and backoff
//! - **Engine**: record filtering, name resolution and cost aggregation
//! - **Workflow**: input validation, deadlines and response shaping
//!
//! # Features
//!
//! - Bounded retries for rate limiting and transient upstream failures
//! - Page caps and per-operation deadlines
//! - Decimal arithmetic for all prices
//! - Graceful shutdown on SIGTERM/SIGINT

mod catalog;
mod config;
mod engine;
mod error;
mod families;
mod model;
mod server;
mod workflow;

#[cfg(test)]
mod test_utils;

use crate::catalog::{Client, RetryPolicy};
use crate::config::{CatalogConfig, RetryConfig};
use crate::families::ServiceFamilyCatalog;
use crate::workflow::PricingWorkflow;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tokio::signal::unix::{signal, SignalKind};

/// Application entry point.
///
/// Loads configuration, wires the catalog client into the workflow and serves
/// HTTP until a termination signal arrives.
#[tokio::main]
async fn main() {
    let app_config = config::load_app_config().expect("Failed to load AppConfig");
    tracing_subscriber::fmt()
        .with_max_level(app_config.log_level())
        .init();

    let catalog_config = config::load_catalog_config().expect("Failed to load CatalogConfig");
    let retry_config = config::load_retry_config().expect("Failed to load RetryConfig");
    let server_config = config::load_server_config().expect("Failed to load ServerConfig");

    let workflow =
        build_workflow(catalog_config, &retry_config).expect("Failed to build pricing workflow");

    let addr = format!("{}:{}", server_config.host, server_config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind {}: {}", addr, e));

    let mut sig_term = signal(SignalKind::terminate()).expect("Failed to register SIGTERM handler");
    let shutdown = async move {
        tokio::select! {
            // Handle SIGTERM for graceful shutdown in containers
            _ = sig_term.recv() => {
                tracing::info!("Received SIGTERM. Exiting...");
            }
            // Handle Ctrl-C for manual termination
            _ = ctrl_c() => {
                tracing::info!("Received SIGINT. Exiting...");
            }
        }
    };

    tracing::info!("Running... Press Ctrl-C or send SIGTERM to terminate.");
    if let Err(e) = server::serve(listener, workflow, shutdown).await {
        tracing::error!("Server failed: {:?}", e);
    }
}

/// Builds the shared workflow over the live catalog.
///
/// The family list is created once here and never changes afterwards.
fn build_workflow(
    catalog_config: CatalogConfig,
    retry_config: &RetryConfig,
) -> anyhow::Result<Arc<PricingWorkflow>> {
    let client = Client::new(catalog_config.clone(), RetryPolicy::from_config(retry_config))?;
    tracing::info!(
        url = %catalog_config.url,
        default_region = %catalog_config.default_region,
        max_pages = catalog_config.max_pages,
        "Catalog client ready"
    );

    Ok(Arc::new(PricingWorkflow::new(
        Arc::new(client),
        Arc::new(ServiceFamilyCatalog::official()),
        catalog_config,
    )))
}
