//! Stateless chat forwarding for quire.
//!
//! A client sends the full conversation with every request; this crate maps
//! it onto the upstream generative-language API, makes one call, and returns
//! the reply text. Nothing is stored between requests.
//!
//! - [`ChatRequest`] / [`ChatReply`]: the client-facing request model
//! - [`ChatBackend`]: the seam to the upstream API ([`GeminiClient`] in production)
//! - [`ChatService`]: validation, credential check and system-instruction placement
//! - [`MockBackend`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use quire_chat::{ChatService, GeminiClient, SystemInstructionMode};
//!
//! let client = GeminiClient::new(DEFAULT_CHAT_ENDPOINT, &api_key, Duration::from_secs(60));
//! let service = ChatService::new(Some(Arc::new(client)), SystemInstructionMode::Prefix);
//! let reply = service.handle_chat(request)?;
//! ```

mod client;
mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod service;
mod types;

pub use client::{DEFAULT_TIMEOUT, GeminiClient, MODEL};
pub use error::{ChatError, ErrorKind, UpstreamError};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockBackend;
pub use quire_config::SystemInstructionMode;
pub use service::ChatService;
pub use types::{ChatPart, ChatReply, ChatRequest, ChatTurn, Content, Role, UpstreamExchange};

/// Upstream generative-language backend.
///
/// Implementations make exactly one blocking call per `send` and keep no
/// conversation state.
pub trait ChatBackend: Send + Sync {
    /// Send one exchange and return the reply text.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] for any transport, status or payload failure.
    fn send(&self, exchange: &UpstreamExchange) -> Result<String, UpstreamError>;
}
