mod config;
mod errors;
mod form;
mod generation;
mod llm_client;
mod models;
mod render;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::{ClaudeResumeGenerator, ResumeService};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{FileKeyValueStore, ResumeStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Builder API v{}", env!("CARGO_PKG_VERSION"));

    // Local resume collection
    let backend = Arc::new(FileKeyValueStore::new(config.store_dir.clone()));
    info!("Resume store at {}", backend.dir().display());
    let store = ResumeStore::new(backend);

    // The API key comes with each submission; only the endpoint is fixed here.
    let generator = Arc::new(ClaudeResumeGenerator::new(
        config.anthropic_api_url.clone(),
        config.generation_timeout,
    ));
    info!(
        "Resume generator ready (model: {}, endpoint: {})",
        llm_client::MODEL,
        config.anthropic_api_url
    );

    let state = AppState {
        resumes: ResumeService::new(generator, store),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
