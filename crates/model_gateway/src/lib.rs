#![deny(unused)]
//! LLM provider gateway for CodeCrew.
//!
//! This crate provides:
//! - `ProviderConfig` with merge-style updates
//! - Backend adapters for OpenAI and Anthropic over `reqwest`
//! - A deterministic `MockProvider` for tests
//! - `create_provider`, the single construction entry point
//!
//! Callers depend only on `codecrew_core::traits::LlmProvider`; the concrete
//! variants stay behind the factory.

pub mod anthropic;
pub mod config;
pub mod mock;
pub mod openai;

pub use anthropic::AnthropicProvider;
pub use config::{ProviderConfig, ProviderConfigUpdate};
pub use mock::{MockProvider, RecordedCall};
pub use openai::OpenAiProvider;

use std::str::FromStr;
use std::sync::Arc;

use codecrew_core::{traits::LlmProvider, Error, Result};

/// The closed set of supported provider kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    Mock,
}

impl ProviderKind {
    /// Every supported kind, in factory dispatch order.
    pub const ALL: [ProviderKind; 3] =
        [ProviderKind::OpenAi, ProviderKind::Anthropic, ProviderKind::Mock];

    /// Canonical name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Mock => "mock",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "anthropic" => Ok(ProviderKind::Anthropic),
            "mock" => Ok(ProviderKind::Mock),
            other => Err(Error::UnsupportedProvider(other.to_string())),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Create a provider of the given kind.
///
/// The only construction entry point: callers never name a concrete adapter.
pub fn create_provider(kind: ProviderKind, config: ProviderConfig) -> Result<Arc<dyn LlmProvider>> {
    tracing::debug!(kind = %kind, model = %config.model, "Creating LLM provider");
    match kind {
        ProviderKind::OpenAi => Ok(Arc::new(OpenAiProvider::new(config)?)),
        ProviderKind::Anthropic => Ok(Arc::new(AnthropicProvider::new(config)?)),
        ProviderKind::Mock => Ok(Arc::new(MockProvider::from_config(&config))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_round_trip() {
        for kind in ProviderKind::ALL {
            assert_eq!(kind.as_str().parse::<ProviderKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind_lists_valid_ones() {
        let err = "llamafile".parse::<ProviderKind>().unwrap_err();
        let rendered = err.to_string();
        assert!(rendered.contains("llamafile"));
        assert!(rendered.contains("openai"));
        assert!(rendered.contains("anthropic"));
        assert!(rendered.contains("mock"));
    }

    #[tokio::test]
    async fn test_factory_builds_mock_with_canned_responses() {
        let config = ProviderConfig::default().with_extra("responses", json!(["canned"]));
        let provider = create_provider(ProviderKind::Mock, config).unwrap();

        assert_eq!(provider.name(), "mock");
        let response = provider
            .generate("hi", &codecrew_core::types::ChatOptions::default())
            .await
            .unwrap();
        assert_eq!(response.content, "canned");
    }
}
