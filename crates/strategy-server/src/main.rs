//! strategy-server
//!
//! Axum server hosting the landing page and proxying strategy prompts to
//! Together.ai. The API key stays here; the browser only ever sees replies.

mod config;
mod error;
mod handlers;
mod routes;
mod state;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use strategy_core::LlmProvider;
use strategy_runtime::TogetherProvider;

use crate::config::ServerConfig;
use crate::routes::{build_router, LEGACY_PROXY_PATH, PROXY_PATH};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment before the filter reads RUST_LOG
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();

    // Initialize LLM provider
    let provider = Arc::new(TogetherProvider::from_env()?);

    match provider.health_check().await {
        Ok(true) => {
            tracing::info!("✓ Together.ai key configured");
            tracing::info!("  Endpoint: {}", provider.config().endpoint());
            tracing::info!("  Model: {}", config.generation.model);
        }
        Ok(false) | Err(_) => {
            tracing::warn!("⚠ TOGETHER_API_KEY not set - strategy requests will fail");
            tracing::warn!("  Set TOGETHER_API_KEY in .env");
        }
    }

    if !config.static_dir.is_dir() {
        tracing::warn!(
            "⚠ Static directory {} not found - only the API will be served",
            config.static_dir.display()
        );
    }

    let addr = config.bind_addr.clone();

    // Build application state
    let state = AppState {
        provider,
        config: Arc::new(config),
    };

    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 strategy-server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health          - Health check");
    tracing::info!("  POST {}    - Generate a marketing strategy", PROXY_PATH);
    tracing::info!("  POST {}    - Same, legacy path", LEGACY_PROXY_PATH);
    tracing::info!("  GET  /*               - Landing page");
    tracing::info!("");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
