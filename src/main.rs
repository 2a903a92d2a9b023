//! carousel-service server entry point.
//!
//! Starts the Axum HTTP server with the carousel REST endpoints.

use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use carousel_service::api;
use carousel_service::app_state::AppState;
use carousel_service::config::ServiceConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ServiceConfig::from_env()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
    tracing::info!(addr = %config.listen_addr, "starting carousel-service");

    // Build application state
    let app_state = AppState::from_config(&config)
        .await
        .context("failed to initialize application state")?;

    // Build router
    let app = api::build_app(app_state, Duration::from_secs(config.request_timeout_secs));

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
