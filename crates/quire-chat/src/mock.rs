//! Mock backend implementation for testing.
//!
//! Provides [`MockBackend`] for exercising chat handling without network access.

use std::sync::Mutex;

use crate::ChatBackend;
use crate::error::UpstreamError;
use crate::types::UpstreamExchange;

/// Mock upstream backend.
///
/// Replies with a fixed text (or fails with a fixed message) and records every
/// exchange it receives.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use quire_chat::{ChatService, MockBackend, SystemInstructionMode};
///
/// let backend = Arc::new(MockBackend::replying("Hi!"));
/// let service = ChatService::new(Some(backend.clone()), SystemInstructionMode::Prefix);
/// ```
#[derive(Debug)]
pub struct MockBackend {
    reply: Result<String, String>,
    exchanges: Mutex<Vec<UpstreamExchange>>,
}

impl MockBackend {
    /// Create a backend that always replies with `text`.
    #[must_use]
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            reply: Ok(text.into()),
            exchanges: Mutex::new(Vec::new()),
        }
    }

    /// Create a backend that always fails with `message`.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            exchanges: Mutex::new(Vec::new()),
        }
    }

    /// Exchanges received so far, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn exchanges(&self) -> Vec<UpstreamExchange> {
        self.exchanges.lock().unwrap().clone()
    }
}

impl ChatBackend for MockBackend {
    fn send(&self, exchange: &UpstreamExchange) -> Result<String, UpstreamError> {
        self.exchanges.lock().unwrap().push(exchange.clone());
        self.reply.clone().map_err(UpstreamError::Other)
    }
}
