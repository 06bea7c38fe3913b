mod analysis;
mod config;
mod errors;
mod extract;
mod knowledge;
mod llm_client;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::knowledge::CompanyKnowledge;
use crate::llm_client::MistralClient;
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

    info!("Starting CV Analysis API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM gateway
    let gateway = Arc::new(MistralClient::new(config.mistral_api_key.clone()));
    info!("LLM gateway initialized (model: {})", llm_client::MODEL);

    // Initialize company knowledge
    let knowledge = CompanyKnowledge::new(config.companies_dir.clone());
    let companies = knowledge.list_companies();
    info!(
        "Company knowledge root: {} ({} companies: {companies:?})",
        config.companies_dir.display(),
        companies.len()
    );

    // Build app state
    let state = AppState { gateway, knowledge };

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
