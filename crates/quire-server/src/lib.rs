//! HTTP chat proxy server for quire.
//!
//! This crate provides a small axum server that forwards chat requests to the
//! upstream generative-language API:
//! - `GET /`: liveness payload
//! - `POST /api/chat`: stateless chat forwarding
//!
//! A missing API key does not stop the server from starting; chat requests
//! fail with a configuration error until one is provided.
//!
//! # Quick Start
//!
//! ```ignore
//! use quire_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         api_key: std::env::var("GEMINI_API_KEY").ok(),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum server (quire-server)
//!                        │
//!                        ├─► GET /          (liveness)
//!                        │
//!                        └─► POST /api/chat
//!                                │
//!                                └─► spawn_blocking ──► ChatService ──► GeminiClient ──► upstream
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use quire_chat::{ChatBackend, ChatService, GeminiClient, SystemInstructionMode};
use quire_config::DEFAULT_CHAT_ENDPOINT;
use state::AppState;

pub use quire_chat::MODEL;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Upstream API key (`None` leaves the chat endpoint unconfigured).
    pub api_key: Option<String>,
    /// Placement of client-supplied system instructions.
    pub system_instruction: SystemInstructionMode,
    /// Upstream API base URL.
    pub upstream_endpoint: String,
    /// Timeout for one upstream call.
    pub upstream_timeout: Duration,
    /// Application version (reported by the liveness endpoint).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8000,
            api_key: None,
            system_instruction: SystemInstructionMode::default(),
            upstream_endpoint: DEFAULT_CHAT_ENDPOINT.to_owned(),
            upstream_timeout: Duration::from_secs(quire_chat::DEFAULT_TIMEOUT),
            version: String::new(),
        }
    }
}

/// Build the chat service for a server configuration.
///
/// Without an API key the service has no backend and rejects every request.
fn chat_service(config: &ServerConfig) -> ChatService {
    let backend = config.api_key.as_deref().map(|api_key| {
        Arc::new(GeminiClient::new(
            &config.upstream_endpoint,
            api_key,
            config.upstream_timeout,
        )) as Arc<dyn ChatBackend>
    });

    if backend.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; /api/chat will fail until it is configured");
    }

    ChatService::new(backend, config.system_instruction)
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState {
        chat: Arc::new(chat_service(&config)),
        version: config.version.clone(),
    });

    let app = app::create_router(state);

    // Bind and run server
    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from quire config.
///
/// # Arguments
///
/// * `config` - quire configuration
/// * `version` - Application version
#[must_use]
pub fn server_config_from_quire_config(
    config: &quire_config::Config,
    version: String,
) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        api_key: config.chat.api_key().map(str::to_owned),
        system_instruction: config.chat.system_instruction,
        upstream_endpoint: config.chat.endpoint.clone(),
        upstream_timeout: Duration::from_secs(config.chat.timeout_secs),
        version,
    }
}
