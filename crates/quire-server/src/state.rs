//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use quire_chat::ChatService;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Chat forwarding service (shared with blocking tasks).
    pub(crate) chat: Arc<ChatService>,
    /// Application version.
    pub(crate) version: String,
}
