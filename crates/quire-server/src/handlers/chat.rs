//! Chat forwarding endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use quire_chat::{ChatError, ChatReply, ChatRequest};

use crate::error::ServerError;
use crate::state::AppState;

/// Handle POST /api/chat.
///
/// The upstream call blocks, so it runs on the blocking thread pool. Each
/// request is independent; no conversation state is kept.
pub(crate) async fn post_chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ServerError> {
    let Json(request) = payload.map_err(|e| ChatError::Validation(e.body_text()))?;

    tracing::debug!(
        history = request.history.len(),
        system_instruction = request.system_instruction.is_some(),
        "Chat request"
    );

    let chat = Arc::clone(&state.chat);
    let reply = tokio::task::spawn_blocking(move || chat.handle_chat(request)).await??;

    Ok(Json(reply))
}
