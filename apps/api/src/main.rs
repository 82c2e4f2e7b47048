mod config;
mod errors;
mod export;
mod generation;
mod layout;
mod llm_client;
mod models;
mod render;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::layout::{default_page_config, font_book};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::session::ResumeSession;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Forge API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client (one call per generation, bounded by the timeout)
    let llm = LlmClient::new(
        config.anthropic_api_key.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )?;
    info!(
        "LLM client initialized (model: {}, timeout: {}s)",
        llm_client::MODEL,
        config.llm_timeout_secs
    );

    // Surface geometry: 794px wide, A4 pages, 2x capture
    let page_config = default_page_config();
    info!(
        "Page config: {}px surface, {}x{}mm pages, capture x{}",
        page_config.surface_width_px,
        page_config.page_width_mm,
        page_config.page_height_mm,
        page_config.capture_scale
    );

    // Layout and PDF export share these faces; parse them before serving
    font_book()?;
    info!("Embedded font faces loaded");

    let state = AppState {
        llm: Arc::new(llm),
        session: Arc::new(ResumeSession::new()),
        page_config,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
