mod config;
mod error;
mod handlers;
mod models;
mod server;
mod services;

use anyhow::{Context, Result};
use dotenv::dotenv;
use std::sync::Arc;

use config::Config;
use handlers::FoodAnalyzer;
use server::create_router;
use services::{InferenceClient, OllamaClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger
    env_logger::init();

    // Load environment variables
    dotenv().ok();

    log::info!("🚀 Starting Food Nutrition Analyzer...");

    let config = Config::from_env()?;

    let client: Arc<dyn InferenceClient> = Arc::new(OllamaClient::new(config.ollama_host.clone()));
    log::info!("✅ Ollama client initialized for {}", config.ollama_host);

    let analyzer = Arc::new(FoodAnalyzer::new(
        client,
        config.vision_model.clone(),
        config.text_model.clone(),
    ));
    log::info!(
        "✅ Food analyzer initialized (vision: {}, text: {})",
        config.vision_model,
        config.text_model
    );

    let app = create_router(analyzer, config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    log::info!("🌐 Server is running on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    log::info!("🛑 Shutting down...");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("❌ Failed to listen for Ctrl+C: {}", e);
    }
}
