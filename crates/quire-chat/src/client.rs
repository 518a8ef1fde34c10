//! Gemini REST API client.
//!
//! Provides a sync HTTP client for the `generateContent` endpoint. Every call
//! carries the full conversation; nothing is kept between calls.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use ureq::Agent;

use crate::ChatBackend;
use crate::error::UpstreamError;
use crate::types::{ChatPart, Content, Role, UpstreamExchange};

/// Upstream model identifier.
pub const MODEL: &str = "gemini-2.5-flash";

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT: u64 = 60;

/// Gemini `generateContent` client.
pub struct GeminiClient {
    agent: Agent,
    endpoint: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a client.
    ///
    /// # Arguments
    /// * `endpoint` - API base URL (e.g., `https://generativelanguage.googleapis.com`)
    /// * `api_key` - Gemini API key
    /// * `timeout` - Global timeout for one upstream call
    #[must_use]
    pub fn new(endpoint: &str, api_key: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            endpoint: endpoint.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
        }
    }

    /// Get the `generateContent` URL for the fixed model.
    fn generate_url(&self) -> String {
        format!("{}/v1beta/models/{MODEL}:generateContent", self.endpoint)
    }
}

impl ChatBackend for GeminiClient {
    fn send(&self, exchange: &UpstreamExchange) -> Result<String, UpstreamError> {
        let url = self.generate_url();
        let body = GenerateContentRequest::from_exchange(exchange);

        tracing::debug!(
            history = exchange.history.len(),
            system_instruction = exchange.system_instruction.is_some(),
            "Calling Gemini"
        );

        let response = self
            .agent
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Accept", "application/json")
            .send_json(&body)?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(UpstreamError::HttpResponse {
                status,
                message: error_message(&error_body),
            });
        }

        let reply: GenerateContentResponse = body_reader.read_json()?;
        reply.into_text()
    }
}

/// Extract `error.message` from a Google API error body, falling back to the raw body.
fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorEnvelope {
        error: ErrorBody,
    }

    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_owned())
}

/// Request body for `generateContent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<WireContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<WireContent<'a>>,
}

#[derive(Debug, Serialize)]
struct WireContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    parts: Vec<WirePart<'a>>,
}

#[derive(Debug, Serialize)]
struct WirePart<'a> {
    text: &'a str,
}

impl<'a> WireContent<'a> {
    fn from_content(content: &'a Content) -> Self {
        Self {
            role: Some(content.role),
            parts: content.parts.iter().map(WirePart::from_part).collect(),
        }
    }

    fn text(role: Option<Role>, text: &'a str) -> Self {
        Self {
            role,
            parts: vec![WirePart { text }],
        }
    }
}

impl<'a> WirePart<'a> {
    fn from_part(part: &'a ChatPart) -> Self {
        Self { text: &part.text }
    }
}

impl<'a> GenerateContentRequest<'a> {
    /// Replay history, then append the new message as a user turn.
    fn from_exchange(exchange: &'a UpstreamExchange) -> Self {
        let mut contents: Vec<_> = exchange
            .history
            .iter()
            .map(WireContent::from_content)
            .collect();
        contents.push(WireContent::text(Some(Role::User), &exchange.message));

        Self {
            contents,
            system_instruction: exchange
                .system_instruction
                .as_deref()
                .map(|text| WireContent::text(None, text)),
        }
    }
}

/// Response body of `generateContent`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenate the text parts of the first candidate.
    fn into_text(self) -> Result<String, UpstreamError> {
        let block_reason = self.prompt_feedback.and_then(|f| f.block_reason);

        let Some(candidate) = self.candidates.into_iter().next() else {
            return Err(UpstreamError::EmptyResponse {
                reason: block_reason.unwrap_or_else(|| "no candidates".to_owned()),
            });
        };

        let texts: Vec<String> = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        if texts.is_empty() {
            return Err(UpstreamError::EmptyResponse {
                reason: candidate
                    .finish_reason
                    .unwrap_or_else(|| "no text parts".to_owned()),
            });
        }

        Ok(texts.concat())
    }
}
