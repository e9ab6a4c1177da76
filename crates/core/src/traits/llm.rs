//! LLM provider contract.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ChatOptions, Message, ProviderResponse};

/// Interchangeable adapter over a text/chat-generation backend.
///
/// Implementations are either real backend adapters or the deterministic
/// mock; callers depend only on this trait.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Name of the backend ("openai", "anthropic", "mock").
    fn name(&self) -> &str;

    /// Check that the provider is usable (credentials present, config sane)
    /// without performing any network call.
    fn validate_config(&self) -> Result<()>;

    /// Generate a chat completion for an ordered conversation.
    async fn generate_chat(
        &self,
        messages: &[Message],
        options: &ChatOptions,
    ) -> Result<ProviderResponse>;

    /// Generate a completion for a single prompt.
    ///
    /// Defined for every implementation as a chat with one user message, so
    /// the two entry points cannot diverge.
    async fn generate(&self, prompt: &str, options: &ChatOptions) -> Result<ProviderResponse> {
        self.generate_chat(&[Message::user(prompt)], options).await
    }
}
