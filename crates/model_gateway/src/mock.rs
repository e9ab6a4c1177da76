//! Deterministic mock provider for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

use codecrew_core::{
    traits::LlmProvider,
    types::{ChatOptions, Message, ProviderResponse, TokenUsage},
    Error, Result,
};

use crate::config::ProviderConfig;

const PROVIDER_NAME: &str = "mock";
const MOCK_MODEL: &str = "mock-model";

/// One recorded call to the mock provider.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// The conversation the caller passed in.
    pub messages: Vec<Message>,
    /// Per-call options the caller passed in.
    pub options: ChatOptions,
}

/// Mock LLM provider: no I/O, deterministic output, full call recording.
///
/// Responses cycle through the canned queue; an empty queue synthesizes a
/// reply from the prompt. "Token" counts are whitespace-delimited word
/// counts of prompt and completion, so assertions never depend on a real
/// tokenizer. The mock fails only when constructed with [`MockProvider::failing`].
pub struct MockProvider {
    responses: Mutex<Vec<String>>,
    cursor: AtomicUsize,
    calls: Mutex<Vec<RecordedCall>>,
    fail_with: Option<String>,
}

impl MockProvider {
    /// Create a mock that cycles through the given responses.
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(responses),
            cursor: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
            fail_with: None,
        }
    }

    /// Create a mock with no canned responses; every reply is synthesized
    /// from the prompt.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Create a mock whose every call fails with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            cursor: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
            fail_with: Some(message.into()),
        }
    }

    /// Create a mock from a provider config, reading canned responses from
    /// the `responses` extra when present.
    pub fn from_config(config: &ProviderConfig) -> Self {
        let responses = config
            .extra
            .get("responses")
            .and_then(|value| value.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default();
        Self::new(responses)
    }

    /// Append a canned response to the queue.
    pub async fn push_response(&self, response: impl Into<String>) {
        self.responses.lock().await.push(response.into());
    }

    /// Clear the call history and rewind the response queue.
    pub async fn reset(&self) {
        self.cursor.store(0, Ordering::SeqCst);
        self.calls.lock().await.clear();
    }

    /// Snapshot of every call made so far, in call order.
    pub async fn call_history(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }

    /// Number of calls made so far.
    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }

    async fn next_content(&self, prompt: &str) -> String {
        let responses = self.responses.lock().await;
        if responses.is_empty() {
            return format!("Mock response to: {prompt}");
        }
        let index = self.cursor.fetch_add(1, Ordering::SeqCst);
        responses[index % responses.len()].clone()
    }
}

fn word_count(text: &str) -> u64 {
    text.split_whitespace().count() as u64
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn validate_config(&self) -> Result<()> {
        Ok(())
    }

    async fn generate_chat(
        &self,
        messages: &[Message],
        options: &ChatOptions,
    ) -> Result<ProviderResponse> {
        if let Some(message) = &self.fail_with {
            return Err(Error::backend(PROVIDER_NAME, message.clone()));
        }

        self.calls.lock().await.push(RecordedCall {
            messages: messages.to_vec(),
            options: options.clone(),
        });

        let prompt: String = messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let content = self.next_content(&prompt).await;

        let prompt_tokens = word_count(&prompt);
        let completion_tokens = word_count(&content);

        Ok(ProviderResponse {
            content,
            model: MOCK_MODEL.to_string(),
            usage: TokenUsage {
                prompt_tokens,
                completion_tokens,
                total_tokens: prompt_tokens + completion_tokens,
            },
            finish_reason: "stop".to_string(),
            metadata: HashMap::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_responses_cycle() {
        let mock = MockProvider::new(vec!["R1".into(), "R2".into()]);
        let options = ChatOptions::default();

        let first = mock.generate("hi", &options).await.unwrap();
        let second = mock.generate("hi", &options).await.unwrap();
        let third = mock.generate("hi", &options).await.unwrap();

        assert_eq!(first.content, "R1");
        assert_eq!(second.content, "R2");
        assert_eq!(third.content, "R1");
        assert_eq!(mock.call_count().await, 3);
    }

    #[tokio::test]
    async fn test_empty_queue_synthesizes_from_prompt() {
        let mock = MockProvider::empty();
        let response = mock.generate("ping", &ChatOptions::default()).await.unwrap();
        assert!(response.content.contains("ping"));
    }

    #[tokio::test]
    async fn test_word_count_usage() {
        let mock = MockProvider::new(vec!["three word reply".into()]);
        let response = mock
            .generate("one two three four", &ChatOptions::default())
            .await
            .unwrap();

        assert_eq!(response.usage.prompt_tokens, 4);
        assert_eq!(response.usage.completion_tokens, 3);
        assert_eq!(response.usage.total_tokens, 7);
    }

    #[tokio::test]
    async fn test_call_history_records_conversation() {
        let mock = MockProvider::empty();
        mock.generate_chat(
            &[Message::system("be terse"), Message::user("hello")],
            &ChatOptions::default(),
        )
        .await
        .unwrap();

        let history = mock.call_history().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].messages.len(), 2);
        assert_eq!(history[0].messages[1].content, "hello");
    }

    #[tokio::test]
    async fn test_generate_is_chat_with_one_user_message() {
        let mock = MockProvider::empty();
        mock.generate("hi", &ChatOptions::default()).await.unwrap();

        let history = mock.call_history().await;
        assert_eq!(history[0].messages.len(), 1);
        assert_eq!(history[0].messages[0].role, codecrew_core::types::Role::User);
    }

    #[tokio::test]
    async fn test_failing_mock() {
        let mock = MockProvider::failing("backend down");
        let err = mock.generate("hi", &ChatOptions::default()).await.unwrap_err();
        assert!(matches!(err, Error::Backend { provider, .. } if provider == "mock"));
    }

    #[tokio::test]
    async fn test_reset_rewinds_queue() {
        let mock = MockProvider::new(vec!["R1".into(), "R2".into()]);
        let options = ChatOptions::default();

        mock.generate("hi", &options).await.unwrap();
        mock.reset().await;

        let response = mock.generate("hi", &options).await.unwrap();
        assert_eq!(response.content, "R1");
        assert_eq!(mock.call_count().await, 1);
    }
}
