use config::{Config, ConfigError, Environment, File};
use secrecy::Secret;
use serde::Deserialize;

/// Application configuration for the team scaffold.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub model_gateway: ModelGatewayConfig,
    pub tools: ToolsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Default tracing filter when RUST_LOG is unset.
    pub filter: String,
    pub json_logs: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelGatewayConfig {
    /// Provider kind used when the caller does not pick one.
    pub default_provider: String,
    /// Model used when the caller does not pick one.
    pub default_model: String,

    pub openai_api_key: Option<Secret<String>>,
    pub anthropic_api_key: Option<Secret<String>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ToolsConfig {
    /// Root directory for the code-search tool.
    pub search_root: String,
    /// File extensions the code-search tool scans by default.
    pub search_extensions: Vec<String>,
}

impl AppConfig {
    /// Load configuration from layered files plus the environment.
    ///
    /// `config/default` is required, `config/local` optional, and
    /// `CODECREW__MODEL_GATEWAY__DEFAULT_PROVIDER=mock`-style variables
    /// override both.
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("CODECREW").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                filter: "info,codecrew=debug".into(),
                json_logs: false,
            },
            model_gateway: ModelGatewayConfig {
                default_provider: "mock".into(),
                default_model: "gpt-4o-mini".into(),
                openai_api_key: None,
                anthropic_api_key: None,
            },
            tools: ToolsConfig {
                search_root: ".".into(),
                search_extensions: vec![".rs".into()],
            },
        }
    }
}
