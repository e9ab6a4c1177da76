#![deny(unused)]
//! CodeCrew — a scaffold for a simulated multi-agent software team.
//!
//! The workspace is composed of:
//! - `codecrew_container`: name-keyed DI container with singleton,
//!   transient, and factory lifetimes plus hierarchical resolution
//! - `codecrew_model_gateway`: LLM provider abstraction with OpenAI and
//!   Anthropic adapters and a deterministic mock
//! - `codecrew_tools`: tool registry, schema derivation, function-calling
//!   export, and the built-in coding tools
//! - `codecrew_sandbox`: the pattern-filtered, allow-listed code executor
//! - `codecrew_agents`: the ten role agents wired through the container
//!
//! This crate re-exports the members and owns the tracing bootstrap.

pub use codecrew_agents as agents;
pub use codecrew_container as container;
pub use codecrew_model_gateway as model_gateway;
pub use codecrew_sandbox as sandbox;
pub use codecrew_tools as tools;

pub use codecrew_core::{config::AppConfig, traits, types, Error, Result};

/// Initialize stdout tracing for binaries and test harnesses.
///
/// `RUST_LOG` overrides the default filter.
pub fn configure_tracing() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info,codecrew=debug".into()),
    );

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    tracing::debug!("Tracing initialized");
    Ok(())
}
