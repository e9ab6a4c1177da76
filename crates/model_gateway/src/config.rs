//! Provider configuration.

use secrecy::Secret;
use serde_json::Value;
use std::collections::HashMap;

/// Sampling temperature bounds shared by the supported backends.
const TEMPERATURE_RANGE: (f32, f32) = (0.0, 2.0);

fn clamp_temperature(value: f32) -> f32 {
    value.clamp(TEMPERATURE_RANGE.0, TEMPERATURE_RANGE.1)
}

/// Configuration for one LLM provider instance.
///
/// Constructed once per provider and immutable afterwards except through
/// [`ProviderConfig::update`]. The temperature is clamped to `[0, 2]`
/// wherever it is set.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Model identifier.
    pub model: String,
    /// Sampling temperature, clamped to `[0, 2]`.
    pub temperature: f32,
    /// Completion token cap.
    pub max_tokens: u32,
    /// Nucleus sampling parameter.
    pub top_p: f32,
    /// Penalty for token repetition.
    pub frequency_penalty: f32,
    /// Penalty for topic repetition.
    pub presence_penalty: f32,
    /// Stop sequences.
    pub stop: Option<Vec<String>>,
    /// Request timeout forwarded to the HTTP client.
    pub timeout_secs: u64,
    /// API key; adapters fall back to their environment variable when unset.
    pub api_key: Option<Secret<String>>,
    /// Backend-specific extras (e.g. canned responses for the mock).
    pub extra: HashMap<String, Value>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_tokens: 1024,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            stop: None,
            timeout_secs: 30,
            api_key: None,
            extra: HashMap::new(),
        }
    }
}

impl ProviderConfig {
    /// Create a config for the given model with default sampling settings.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Set the sampling temperature (clamped).
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = clamp_temperature(temperature);
        self
    }

    /// Set the completion token cap.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the API key explicitly instead of the environment fallback.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(Secret::new(api_key.into()));
        self
    }

    /// Set the stop sequences.
    pub fn with_stop(mut self, stop: Vec<String>) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Attach a backend-specific extra.
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Merge an update into the config. Unset fields keep their values;
    /// `extra` entries are merged key-by-key.
    pub fn update(&mut self, update: ProviderConfigUpdate) {
        if let Some(model) = update.model {
            self.model = model;
        }
        if let Some(temperature) = update.temperature {
            self.temperature = clamp_temperature(temperature);
        }
        if let Some(max_tokens) = update.max_tokens {
            self.max_tokens = max_tokens;
        }
        if let Some(top_p) = update.top_p {
            self.top_p = top_p;
        }
        if let Some(frequency_penalty) = update.frequency_penalty {
            self.frequency_penalty = frequency_penalty;
        }
        if let Some(presence_penalty) = update.presence_penalty {
            self.presence_penalty = presence_penalty;
        }
        if let Some(stop) = update.stop {
            self.stop = Some(stop);
        }
        if let Some(timeout_secs) = update.timeout_secs {
            self.timeout_secs = timeout_secs;
        }
        self.extra.extend(update.extra);
    }
}

/// Partial configuration applied with [`ProviderConfig::update`].
#[derive(Debug, Clone, Default)]
pub struct ProviderConfigUpdate {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub top_p: Option<f32>,
    pub frequency_penalty: Option<f32>,
    pub presence_penalty: Option<f32>,
    pub stop: Option<Vec<String>>,
    pub timeout_secs: Option<u64>,
    pub extra: HashMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_clamped() {
        let config = ProviderConfig::new("gpt-4o").with_temperature(3.5);
        assert_eq!(config.temperature, 2.0);

        let config = ProviderConfig::new("gpt-4o").with_temperature(-1.0);
        assert_eq!(config.temperature, 0.0);
    }

    #[test]
    fn test_update_merges() {
        let mut config = ProviderConfig::new("gpt-4o").with_max_tokens(256);
        config.update(ProviderConfigUpdate {
            temperature: Some(9.0),
            stop: Some(vec!["END".into()]),
            ..Default::default()
        });

        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.max_tokens, 256);
        assert_eq!(config.temperature, 2.0);
        assert_eq!(config.stop.as_deref(), Some(&["END".to_string()][..]));
    }
}
