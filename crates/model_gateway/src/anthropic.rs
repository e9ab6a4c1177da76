//! Anthropic messages adapter.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use codecrew_core::{
    traits::LlmProvider,
    types::{ChatOptions, Message, ProviderResponse, Role, TokenUsage},
    Error, Result,
};

use crate::config::{ProviderConfig, ProviderConfigUpdate};

const PROVIDER_NAME: &str = "anthropic";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
const API_VERSION: &str = "2023-06-01";

/// Adapter over the Anthropic messages endpoint.
///
/// Anthropic carries the system prompt as a top-level field rather than a
/// message role, so system messages are extracted from the conversation
/// before the request is built.
pub struct AnthropicProvider {
    config: ProviderConfig,
    base_url: String,
    client: reqwest::Client,
}

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop_sequences: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    model: String,
    stop_reason: Option<String>,
    usage: WireUsage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    input_tokens: u64,
    output_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

// =============================================================================
// Provider
// =============================================================================

impl AnthropicProvider {
    /// Create a new adapter from the given configuration.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::backend(PROVIDER_NAME, format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            base_url: DEFAULT_BASE_URL.to_string(),
            client,
        })
    }

    /// Point the adapter at a different endpoint (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Merge configuration changes.
    pub fn update_config(&mut self, update: ProviderConfigUpdate) {
        self.config.update(update);
    }

    fn api_key(&self) -> Result<String> {
        if let Some(key) = &self.config.api_key {
            return Ok(key.expose_secret().clone());
        }
        std::env::var(API_KEY_ENV).map_err(|_| {
            Error::missing_credentials(
                PROVIDER_NAME,
                format!("set api_key in the provider config or export {API_KEY_ENV}"),
            )
        })
    }

    fn build_request(&self, messages: &[Message], options: &ChatOptions) -> MessagesRequest {
        let mut system_parts = Vec::new();
        let mut chat_messages = Vec::new();
        for message in messages {
            match message.role {
                Role::System => system_parts.push(message.content.clone()),
                _ => chat_messages.push(WireMessage {
                    role: message.role.as_str().to_string(),
                    content: message.content.clone(),
                }),
            }
        }

        MessagesRequest {
            model: options
                .model
                .clone()
                .unwrap_or_else(|| self.config.model.clone()),
            messages: chat_messages,
            system: if system_parts.is_empty() {
                None
            } else {
                Some(system_parts.join("\n\n"))
            },
            max_tokens: options.max_tokens.unwrap_or(self.config.max_tokens),
            temperature: options
                .temperature
                .unwrap_or(self.config.temperature)
                .clamp(0.0, 2.0),
            top_p: options.top_p.unwrap_or(self.config.top_p),
            stop_sequences: options.stop.clone().or_else(|| self.config.stop.clone()),
        }
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn validate_config(&self) -> Result<()> {
        self.api_key().map(|_| ())
    }

    async fn generate_chat(
        &self,
        messages: &[Message],
        options: &ChatOptions,
    ) -> Result<ProviderResponse> {
        let api_key = self.api_key()?;
        let request = self.build_request(messages, options);

        tracing::debug!(
            model = %request.model,
            messages = request.messages.len(),
            "Calling Anthropic messages"
        );

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::backend(PROVIDER_NAME, format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            return Err(Error::backend(PROVIDER_NAME, format!("{status}: {message}")));
        }

        let payload: MessagesResponse = response
            .json()
            .await
            .map_err(|e| Error::backend(PROVIDER_NAME, format!("malformed response: {e}")))?;

        let content = payload
            .content
            .iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text.clone())
            .unwrap_or_default();

        Ok(ProviderResponse {
            content,
            model: payload.model,
            usage: TokenUsage {
                prompt_tokens: payload.usage.input_tokens,
                completion_tokens: payload.usage.output_tokens,
                total_tokens: payload.usage.input_tokens + payload.usage.output_tokens,
            },
            finish_reason: payload.stop_reason.unwrap_or_default(),
            metadata: HashMap::new(),
        })
    }
}
