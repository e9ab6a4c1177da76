//! OpenAI chat-completions adapter.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use codecrew_core::{
    traits::LlmProvider,
    types::{ChatOptions, Message, ProviderResponse, TokenUsage},
    Error, Result,
};

use crate::config::{ProviderConfig, ProviderConfigUpdate};

const PROVIDER_NAME: &str = "openai";
const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Adapter over the OpenAI chat-completions endpoint.
pub struct OpenAiProvider {
    config: ProviderConfig,
    base_url: String,
    client: reqwest::Client,
}

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<WireMessage>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: String,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    model: String,
    choices: Vec<ChatChoice>,
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    prompt_tokens: u64,
    completion_tokens: u64,
    total_tokens: u64,
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

impl OpenAiProvider {
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

    fn build_request(&self, messages: &[Message], options: &ChatOptions) -> ChatRequest {
        ChatRequest {
            model: options
                .model
                .clone()
                .unwrap_or_else(|| self.config.model.clone()),
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str().to_string(),
                    content: m.content.clone(),
                    name: m.name.clone(),
                })
                .collect(),
            temperature: options
                .temperature
                .unwrap_or(self.config.temperature)
                .clamp(0.0, 2.0),
            max_tokens: options.max_tokens.unwrap_or(self.config.max_tokens),
            top_p: options.top_p.unwrap_or(self.config.top_p),
            frequency_penalty: self.config.frequency_penalty,
            presence_penalty: self.config.presence_penalty,
            stop: options.stop.clone().or_else(|| self.config.stop.clone()),
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
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
            "Calling OpenAI chat completions"
        );

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(api_key)
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

        let payload: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::backend(PROVIDER_NAME, format!("malformed response: {e}")))?;

        let choice = payload
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::backend(PROVIDER_NAME, "response contained no choices"))?;

        let usage = payload
            .usage
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        Ok(ProviderResponse {
            content: choice.message.content.unwrap_or_default(),
            model: payload.model,
            usage,
            finish_reason: choice.finish_reason.unwrap_or_default(),
            metadata: HashMap::new(),
        })
    }
}
