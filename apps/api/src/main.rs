mod config;
mod errors;
mod generation;
mod job_posting;
mod letter;
mod resume;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::{DecodingConfig, InferenceClient};
use crate::job_posting::JobPostingFetcher;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cover letter service v{}", env!("CARGO_PKG_VERSION"));

    // Job posting fetcher (one HTTP client for the whole process)
    let fetcher = JobPostingFetcher::new(Duration::from_secs(config.fetch_timeout_secs))?;
    info!(
        "Job posting fetcher initialized (timeout: {}s)",
        config.fetch_timeout_secs
    );

    // Generation model, loaded once and shared read-only
    let model = InferenceClient::new(&config, DecodingConfig::default())?;
    info!(
        "Generation model initialized (model: {}, endpoint: {}, max concurrent: {})",
        config.generation_model, config.inference_url, config.max_concurrent_generations
    );

    let state = AppState {
        config: config.clone(),
        fetcher,
        model: Arc::new(model),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
