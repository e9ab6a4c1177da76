//! Error types for CodeCrew.

use thiserror::Error;

/// Result type alias using CodeCrew's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for CodeCrew.
///
/// Variants fall into three families that are never conflated: container
/// errors (wiring mistakes), provider errors (credential/backend problems),
/// and tool errors. Tool failures normally stay inside a `ToolResult`; the
/// variants below surface only at the registry boundary (unknown or
/// duplicate names) or inside a tool's own `run` before capture.
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Container Errors
    // =========================================================================
    #[error("Service '{0}' is already registered")]
    AlreadyRegistered(String),

    #[error("Service '{0}' is not registered")]
    NotRegistered(String),

    #[error("Service '{name}' is not of the requested type ({expected})")]
    ServiceType { name: String, expected: &'static str },

    // =========================================================================
    // Provider Errors
    // =========================================================================
    #[error("[{provider}] missing credentials: {message}")]
    MissingCredentials { provider: String, message: String },

    #[error("[{provider}] {message}")]
    Backend { provider: String, message: String },

    #[error("Unsupported provider kind '{0}' (valid kinds: openai, anthropic, mock)")]
    UnsupportedProvider(String),

    // =========================================================================
    // Tool Errors
    // =========================================================================
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Tool '{0}' is already registered")]
    DuplicateTool(String),

    #[error("Tool execution failed: {0}")]
    ToolExecution(String),

    #[error("Security violation: {0}")]
    SecurityViolation(String),

    // =========================================================================
    // Generic Errors
    // =========================================================================
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create an already-registered error.
    pub fn already_registered(name: impl Into<String>) -> Self {
        Self::AlreadyRegistered(name.into())
    }

    /// Create a not-registered error.
    pub fn not_registered(name: impl Into<String>) -> Self {
        Self::NotRegistered(name.into())
    }

    /// Create a missing-credentials error.
    pub fn missing_credentials(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MissingCredentials {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a backend error tagged with the provider name.
    pub fn backend(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Backend {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a tool not found error.
    pub fn tool_not_found(name: impl Into<String>) -> Self {
        Self::ToolNotFound(name.into())
    }

    /// Create a tool execution error.
    pub fn tool_execution(msg: impl Into<String>) -> Self {
        Self::ToolExecution(msg.into())
    }

    /// Create a security violation error.
    pub fn security_violation(msg: impl Into<String>) -> Self {
        Self::SecurityViolation(msg.into())
    }

    /// Create an invalid request error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
