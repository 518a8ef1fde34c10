//! Liveness endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

/// Service name reported by the liveness endpoint.
const SERVICE_NAME: &str = "Gemini Chatbot Proxy";

/// Response for `GET /`.
#[derive(Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
    service: &'static str,
    model: &'static str,
    configured: bool,
    version: String,
}

/// Handle GET /.
///
/// Always succeeds, whether or not an API key is configured.
pub(crate) async fn get_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
        model: quire_chat::MODEL,
        configured: state.chat.is_configured(),
        version: state.version.clone(),
    })
}
