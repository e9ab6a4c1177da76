use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Chat Types
// =============================================================================

/// Role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Wire-format name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single message in a conversation.
///
/// An ordered slice of messages forms a conversation; order is chronological
/// and semantically significant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role of the sender.
    pub role: Role,

    /// Message content.
    pub content: String,

    /// Optional speaker name (e.g. an agent role).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            name: None,
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            name: None,
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            name: None,
        }
    }

    /// Attach a speaker name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Token usage reported for one generation call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt.
    pub prompt_tokens: u64,
    /// Tokens produced in the completion.
    pub completion_tokens: u64,
    /// Total tokens for the call.
    pub total_tokens: u64,
}

/// Response from an LLM provider. Produced once per call, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// Generated text content.
    pub content: String,

    /// Model that produced the response.
    pub model: String,

    /// Token usage, mapped 1:1 from the backend when available.
    pub usage: TokenUsage,

    /// Why generation stopped ("stop", "length", ...).
    pub finish_reason: String,

    /// Provider-specific extras.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Per-call overrides for a generation request.
///
/// Every field is optional; unset fields fall back to the provider's
/// configured values.
#[derive(Debug, Clone, Default)]
pub struct ChatOptions {
    /// Override the configured model.
    pub model: Option<String>,
    /// Override the sampling temperature.
    pub temperature: Option<f32>,
    /// Override the completion token cap.
    pub max_tokens: Option<u32>,
    /// Override the nucleus sampling parameter.
    pub top_p: Option<f32>,
    /// Override the stop sequences.
    pub stop: Option<Vec<String>>,
}
