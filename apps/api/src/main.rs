mod config;
mod errors;
mod matching;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::matching::client::MatchingClient;
use crate::matching::orchestrator::ScoringOrchestrator;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TalentMatch API v{}", env!("CARGO_PKG_VERSION"));

    if config.provider.api_key.trim().is_empty() {
        info!("No scoring provider API key set; running on heuristic fallback scoring");
    }

    // Initialize the matching client
    let client = MatchingClient::new(config.provider.clone());
    info!(
        "Matching client initialized (endpoint: {}, timeout: {}s, retries: {})",
        config.provider.base_url, config.provider.timeout_secs, config.provider.retry_count
    );

    // Initialize the orchestrator with the bulk concurrency bound
    let orchestrator = Arc::new(ScoringOrchestrator::new(
        Arc::new(client),
        config.bulk_concurrency,
    ));

    // Build app state
    let state = AppState { orchestrator };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
