//! Catalog search service entry point.

mod logging;

use std::sync::Arc;

use anyhow::Context;
use backend::{ElasticSearchClient, SearchConfig, SearchQueryer, server_extra};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = SearchConfig::from_env();
    logging::init_logging(config.json_logs).context("Failed to initialize logging")?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        elasticsearch = %config.elasticsearch_url,
        datasets_index = %config.indices.datasets,
        "Starting catalog search"
    );

    let client = ElasticSearchClient::new(config.elasticsearch_url.clone(), config.request_timeout)
        .context("Failed to create search backend client")?;
    let queryer = Arc::new(SearchQueryer::new(Arc::new(client), config.indices.clone()));
    let app = server_extra::router(queryer);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener on {}", config.listen_addr))?;
    tracing::info!("Catalog search listening on http://{}", config.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server terminated unexpectedly")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
