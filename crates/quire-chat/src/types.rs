//! Chat request model and its mapping onto an upstream exchange.

use serde::{Deserialize, Serialize};

use crate::SystemInstructionMode;
use crate::error::ChatError;

/// One text part of a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatPart {
    /// Part text.
    pub text: String,
}

/// One turn of client-supplied history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Client role label (`user`, `model`, `bot`, ...).
    pub role: String,
    /// Text parts.
    pub parts: Vec<ChatPart>,
}

/// Body of a chat request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Complete prior conversation, oldest first.
    #[serde(default)]
    pub history: Vec<ChatTurn>,
    /// The new user message.
    pub message: String,
    /// Optional instruction or retrieval context for the model.
    #[serde(default)]
    pub system_instruction: Option<String>,
}

/// Reply to a chat request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    /// Model reply text, unmodified.
    pub text: String,
}

/// Upstream conversation role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user.
    User,
    /// The model / assistant.
    Model,
}

impl Role {
    /// Map a client role label: `user` stays `user`, everything else is the model.
    #[must_use]
    pub fn from_client(role: &str) -> Self {
        if role == "user" { Self::User } else { Self::Model }
    }
}

/// One turn in upstream form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    /// Normalized role.
    pub role: Role,
    /// Text parts.
    pub parts: Vec<ChatPart>,
}

/// What a [`ChatBackend`](crate::ChatBackend) receives for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamExchange {
    /// Prior turns, oldest first.
    pub history: Vec<Content>,
    /// Message text to send as the new user turn.
    pub message: String,
    /// System-level instruction, set only in [`SystemInstructionMode::Native`].
    pub system_instruction: Option<String>,
}

impl ChatRequest {
    /// Check the request shape.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Validation`] if the message is blank or a history
    /// turn has no parts.
    pub fn validate(&self) -> Result<(), ChatError> {
        if self.message.trim().is_empty() {
            return Err(ChatError::Validation("message cannot be empty".to_owned()));
        }
        if let Some(index) = self.history.iter().position(|turn| turn.parts.is_empty()) {
            return Err(ChatError::Validation(format!(
                "history[{index}] must have at least one part"
            )));
        }
        Ok(())
    }

    /// Map the request onto the upstream shape.
    ///
    /// Roles are normalized with [`Role::from_client`]. A non-empty system
    /// instruction is either prefixed onto the message or passed through as a
    /// system instruction, depending on `mode`.
    #[must_use]
    pub fn into_exchange(self, mode: SystemInstructionMode) -> UpstreamExchange {
        let history = self
            .history
            .into_iter()
            .map(|turn| Content {
                role: Role::from_client(&turn.role),
                parts: turn.parts,
            })
            .collect();

        let instruction = self.system_instruction.filter(|s| !s.is_empty());

        match (mode, instruction) {
            (_, None) => UpstreamExchange {
                history,
                message: self.message,
                system_instruction: None,
            },
            (SystemInstructionMode::Prefix, Some(instruction)) => UpstreamExchange {
                history,
                message: format!("{instruction}\n\nUser Question: {}", self.message),
                system_instruction: None,
            },
            (SystemInstructionMode::Native, Some(instruction)) => UpstreamExchange {
                history,
                message: self.message,
                system_instruction: Some(instruction),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn turn(role: &str, text: &str) -> ChatTurn {
        ChatTurn {
            role: role.to_owned(),
            parts: vec![ChatPart {
                text: text.to_owned(),
            }],
        }
    }

    fn request(system_instruction: Option<&str>) -> ChatRequest {
        ChatRequest {
            history: vec![turn("user", "hi"), turn("bot", "hello!")],
            message: "what is a trait?".to_owned(),
            system_instruction: system_instruction.map(str::to_owned),
        }
    }

    #[test]
    fn test_role_from_client() {
        assert_eq!(Role::from_client("user"), Role::User);
        assert_eq!(Role::from_client("model"), Role::Model);
        assert_eq!(Role::from_client("bot"), Role::Model);
        assert_eq!(Role::from_client("User"), Role::Model);
    }

    #[test]
    fn test_deserialize_request() {
        let json = r#"{
            "history": [{"role": "user", "parts": [{"text": "hi"}]}],
            "message": "hello",
            "system_instruction": "be brief"
        }"#;
        let request: ChatRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.history, vec![turn("user", "hi")]);
        assert_eq!(request.message, "hello");
        assert_eq!(request.system_instruction.as_deref(), Some("be brief"));
    }

    #[test]
    fn test_deserialize_request_defaults() {
        let request: ChatRequest = serde_json::from_str(r#"{"message": "hello"}"#).unwrap();
        assert!(request.history.is_empty());
        assert!(request.system_instruction.is_none());
    }

    #[test]
    fn test_validate_rejects_blank_message() {
        let mut req = request(None);
        req.message = "  \n".to_owned();
        let err = req.validate().unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));
    }

    #[test]
    fn test_validate_rejects_turn_without_parts() {
        let mut req = request(None);
        req.history[1].parts.clear();
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("history[1]"));
    }

    #[test]
    fn test_into_exchange_without_instruction() {
        let exchange = ChatRequest {
            history: Vec::new(),
            message: "hello".to_owned(),
            system_instruction: None,
        }
        .into_exchange(SystemInstructionMode::Prefix);

        assert_eq!(
            exchange,
            UpstreamExchange {
                history: Vec::new(),
                message: "hello".to_owned(),
                system_instruction: None,
            }
        );
    }

    #[test]
    fn test_into_exchange_normalizes_roles() {
        let exchange = request(None).into_exchange(SystemInstructionMode::Prefix);
        let roles: Vec<_> = exchange.history.iter().map(|c| c.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Model]);
        assert_eq!(exchange.history[1].parts[0].text, "hello!");
    }

    #[test]
    fn test_into_exchange_prefix_mode() {
        let exchange = request(Some("Docs: traits are interfaces."))
            .into_exchange(SystemInstructionMode::Prefix);

        assert_eq!(
            exchange.message,
            "Docs: traits are interfaces.\n\nUser Question: what is a trait?"
        );
        assert!(exchange.system_instruction.is_none());
    }

    #[test]
    fn test_into_exchange_native_mode() {
        let exchange = request(Some("Docs: traits are interfaces."))
            .into_exchange(SystemInstructionMode::Native);

        assert_eq!(exchange.message, "what is a trait?");
        assert_eq!(
            exchange.system_instruction.as_deref(),
            Some("Docs: traits are interfaces.")
        );
    }

    #[test]
    fn test_into_exchange_empty_instruction_is_absent() {
        for mode in [SystemInstructionMode::Prefix, SystemInstructionMode::Native] {
            let exchange = request(Some("")).into_exchange(mode);
            assert_eq!(exchange.message, "what is a trait?");
            assert!(exchange.system_instruction.is_none());
        }
    }

    #[test]
    fn test_reply_serialization() {
        let json = serde_json::to_value(ChatReply {
            text: "answer".to_owned(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"text": "answer"}));
    }
}
