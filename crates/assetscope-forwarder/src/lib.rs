//! AssetScope Forwarder
//!
//! HTTP service that accepts one PDF per request, forwards it to the
//! inference provider with a fixed extraction instruction and schema, and
//! returns the extracted assets as JSON. The inference credential stays on
//! the server and never reaches clients.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod parser;
pub mod prompt;
pub mod upload;

use assetscope_llm::{GeminiProvider, InferenceError, InferenceProvider};
use config::ForwarderConfig;
use handlers::{create_router, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Forwarder error
#[derive(Debug, thiserror::Error)]
pub enum ForwarderError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Inference provider could not be constructed
    #[error("Inference provider error: {0}")]
    Inference(#[from] InferenceError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Build application state from configuration
///
/// A missing credential is not fatal: the server still starts and answers
/// processing requests with a configuration error.
pub fn build_state(config: &ForwarderConfig) -> Result<AppState, ForwarderError> {
    let inference: Option<Arc<dyn InferenceProvider>> = match config.credential() {
        Some(api_key) => Some(Arc::new(GeminiProvider::new(
            api_key,
            &config.model,
            config.inference_timeout(),
        )?)),
        None => {
            warn!(
                "{} is not set; document processing will fail until it is provisioned",
                config.api_key_env
            );
            None
        }
    };

    Ok(AppState::new(inference)
        .with_upload_dir(config.upload_dir.clone())
        .with_max_upload_bytes(config.max_upload_bytes))
}

/// Start the Forwarder HTTP server
///
/// Initializes logging, builds the inference provider from the environment
/// and serves until the process exits.
pub async fn start_server(config: ForwarderConfig) -> Result<(), ForwarderError> {
    // Initialize tracing; RUST_LOG overrides the default level
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();

    config.validate()?;

    info!("Starting AssetScope Forwarder");
    info!("Bind address: {}", config.bind_addr());
    info!("Model: {}", config.model);
    info!("Upload limit: {} bytes", config.max_upload_bytes);

    let state = build_state(&config)?;
    let app = create_router(state);

    // Bind and serve
    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Forwarder listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ForwarderError::Server(e.to_string()))?;

    Ok(())
}
