//! Error types for the chat proxy.

/// Error from the upstream generative-language API.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] ureq::Error),

    /// Upstream returned an error status.
    #[error("upstream error {status}: {message}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Error message from the upstream error body, or the raw body.
        message: String,
    },

    /// Upstream answered without any reply text.
    #[error("upstream returned no text ({reason})")]
    EmptyResponse {
        /// Block or finish reason reported by upstream, if any.
        reason: String,
    },

    /// Any other backend failure.
    #[error("{0}")]
    Other(String),
}

/// Failure class of a chat request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No upstream credential is configured.
    Configuration,
    /// The request itself is malformed.
    Validation,
    /// The upstream call failed.
    Upstream,
}

impl ErrorKind {
    /// Stable lowercase name used in error envelopes.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Validation => "validation",
            Self::Upstream => "upstream",
        }
    }
}

/// Error from handling one chat request.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// No API key was configured at startup.
    #[error("GEMINI_API_KEY not configured on server.")]
    NotConfigured,

    /// The request failed validation.
    #[error("{0}")]
    Validation(String),

    /// The upstream call failed.
    #[error("{0}")]
    Upstream(#[from] UpstreamError),
}

impl ChatError {
    /// The failure class, for mapping onto transport status codes.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotConfigured => ErrorKind::Configuration,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Upstream(_) => ErrorKind::Upstream,
        }
    }
}
