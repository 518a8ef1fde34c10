//! Chat request handling.

use std::sync::Arc;

use crate::error::ChatError;
use crate::types::{ChatReply, ChatRequest};
use crate::{ChatBackend, SystemInstructionMode};

/// Handles chat requests against an optional upstream backend.
///
/// A service without a backend still answers, but every request fails with
/// [`ChatError::NotConfigured`].
pub struct ChatService {
    backend: Option<Arc<dyn ChatBackend>>,
    mode: SystemInstructionMode,
}

impl ChatService {
    /// Create a service. Pass `None` when no credential is configured.
    pub fn new(backend: Option<Arc<dyn ChatBackend>>, mode: SystemInstructionMode) -> Self {
        Self { backend, mode }
    }

    /// Whether an upstream backend is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// System instruction placement in use.
    #[must_use]
    pub fn mode(&self) -> SystemInstructionMode {
        self.mode
    }

    /// Validate, map and forward one request. Blocks for the upstream call.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Validation`] for a malformed request,
    /// [`ChatError::NotConfigured`] without a backend, and
    /// [`ChatError::Upstream`] if the upstream call fails. Failures are never
    /// retried.
    pub fn handle_chat(&self, request: ChatRequest) -> Result<ChatReply, ChatError> {
        request.validate()?;

        let backend = self.backend.as_ref().ok_or(ChatError::NotConfigured)?;

        let exchange = request.into_exchange(self.mode);
        let text = backend.send(&exchange).inspect_err(|e| {
            tracing::error!(error = %e, "Upstream chat call failed");
        })?;

        Ok(ChatReply { text })
    }
}
