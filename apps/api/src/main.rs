mod config;
mod errors;
mod extract;
mod keywords;
mod layout;
mod llm_client;
mod render;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::keywords::LlmKeywordSource;
use crate::layout::{default_layout_config, FontFamily};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Keywordify API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client and the default keyword source
    let llm = LlmClient::new(config.openai_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    let keyword_source = Arc::new(LlmKeywordSource::new(llm));

    // Layout config: Helvetica 11pt on US letter, keyword bounds from env
    let mut layout = default_layout_config(FontFamily::Helvetica);
    layout.min_keywords = config.min_keywords;
    layout.max_keywords = config.max_keywords;
    info!(
        "Layout config: {:?} {}pt, {}-{} keywords",
        layout.font, layout.font_size_pt, layout.min_keywords, layout.max_keywords
    );

    // Build app state
    let state = AppState {
        keyword_source,
        config: config.clone(),
        layout,
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
