//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use quire_chat::{ChatError, ErrorKind};
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Chat request failed.
    #[error(transparent)]
    Chat(#[from] ChatError),

    /// The blocking chat task did not complete.
    #[error("Chat task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ServerError {
    /// HTTP status for this error.
    fn status(&self) -> StatusCode {
        match self {
            Self::Chat(e) => match e.kind() {
                ErrorKind::Configuration => StatusCode::SERVICE_UNAVAILABLE,
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::Upstream => StatusCode::BAD_GATEWAY,
            },
            Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Envelope `kind` label for this error.
    fn kind(&self) -> &'static str {
        match self {
            Self::Chat(e) => e.kind().as_str(),
            Self::Task(_) => "internal",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = json!({"error": self.to_string(), "kind": self.kind()});

        (status, axum::Json(body)).into_response()
    }
}
