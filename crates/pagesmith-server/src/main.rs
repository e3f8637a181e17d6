//! Pagesmith HTTP server.
//!
//! Thin delivery layer over the core: wires the OpenRouter client and the
//! site store into the API router and serves it.

mod config;
mod error;
mod routes;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use pagesmith_core::pipeline::PipelineConfig;
use pagesmith_infrastructure::{InMemorySiteRepository, OpenRouterClient};

use crate::config::ServerConfig;
use crate::routes::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let state = AppState {
        completions: Arc::new(OpenRouterClient::new(config.openrouter_api_key.clone())?),
        sites: Arc::new(InMemorySiteRepository::new()),
        pipeline_config: PipelineConfig::default(),
    };

    let app = routes::router(state);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!(port = config.port, "server is running");
    axum::serve(listener, app).await?;
    Ok(())
}
