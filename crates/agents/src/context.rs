//! Shared wiring for the role agents.

use std::sync::Arc;

use codecrew_container::ServiceContainer;
use codecrew_core::{traits::LlmProvider, types::ChatOptions, Result};
use codecrew_tools::ToolRegistry;

/// Well-known container name of the team's LLM provider.
pub const LLM_PROVIDER_SERVICE: &str = "llm_provider";

/// Well-known container name of the team's tool registry.
pub const TOOL_REGISTRY_SERVICE: &str = "tool_registry";

/// Handle every role agent holds: a container from which the shared LLM
/// provider and tool registry are resolved on demand.
#[derive(Clone)]
pub struct AgentContext {
    container: Arc<ServiceContainer>,
}

impl AgentContext {
    /// Create a context over the given container.
    pub fn new(container: Arc<ServiceContainer>) -> Self {
        Self { container }
    }

    /// The underlying container.
    pub fn container(&self) -> &Arc<ServiceContainer> {
        &self.container
    }

    /// Resolve the shared LLM provider.
    pub fn provider(&self) -> Result<Arc<dyn LlmProvider>> {
        let provider = self
            .container
            .resolve::<Arc<dyn LlmProvider>>(LLM_PROVIDER_SERVICE)?;
        Ok(provider.as_ref().clone())
    }

    /// Resolve the shared tool registry.
    pub fn tools(&self) -> Result<Arc<ToolRegistry>> {
        let registry = self
            .container
            .resolve::<Arc<ToolRegistry>>(TOOL_REGISTRY_SERVICE)?;
        Ok(registry.as_ref().clone())
    }

    /// Ask the team's LLM for advice on behalf of a role.
    pub async fn consult(&self, role: &str, prompt: &str) -> Result<String> {
        let provider = self.provider()?;
        let response = provider.generate(prompt, &ChatOptions::default()).await?;
        tracing::debug!(
            role,
            model = %response.model,
            tokens = response.usage.total_tokens,
            "Consultation complete"
        );
        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codecrew_model_gateway::{create_provider, ProviderConfig, ProviderKind};

    fn wired_context() -> AgentContext {
        let container = Arc::new(ServiceContainer::new());
        let provider = create_provider(ProviderKind::Mock, ProviderConfig::default()).unwrap();
        container
            .register_singleton(LLM_PROVIDER_SERVICE, provider)
            .unwrap();
        container
            .register_singleton(TOOL_REGISTRY_SERVICE, Arc::new(ToolRegistry::new()))
            .unwrap();
        AgentContext::new(container)
    }

    #[tokio::test]
    async fn test_consult_uses_registered_provider() {
        let ctx = wired_context();
        let reply = ctx.consult("project_manager", "status?").await.unwrap();
        assert!(!reply.is_empty());
    }

    #[test]
    fn test_missing_provider_is_container_error() {
        let container = Arc::new(ServiceContainer::new());
        let ctx = AgentContext::new(container);
        assert!(ctx.provider().is_err());
    }
}
