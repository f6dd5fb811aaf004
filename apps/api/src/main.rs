mod analysis;
mod config;
mod errors;
mod form;
mod llm_client;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::form::transport::{AnalyzeTransport, HttpTransport};
use crate::llm_client::{ChatProvider, LlmClient};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Readiness API v{}", env!("CARGO_PKG_VERSION"));

    let timeout = Duration::from_secs(config.openai_timeout_secs);

    // Initialize LLM client (absent credential is reported per request, not here)
    let llm: Option<Arc<dyn ChatProvider>> = match &config.openai_api_key {
        Some(key) => {
            let client = LlmClient::new(key.clone(), config.openai_base_url.clone(), timeout)?;
            info!(
                "LLM client initialized (model: {}, base: {})",
                llm_client::MODEL,
                config.openai_base_url
            );
            Some(Arc::new(client))
        }
        None => {
            warn!("OPENAI_API_KEY is not set; /api/analyze will answer 500 until it is");
            None
        }
    };

    let transport: Option<Arc<dyn AnalyzeTransport>> = match &config.analyze_api_url {
        Some(url) => {
            info!("Form submits to remote analysis endpoint {url}");
            Some(Arc::new(HttpTransport::new(url.clone(), timeout)?))
        }
        None => None,
    };

    let app = build_router(AppState { llm }, transport)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
