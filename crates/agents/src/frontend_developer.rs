//! Frontend developer agent.

use codecrew_core::Result;

use crate::context::AgentContext;

pub struct FrontendDeveloperAgent {
    ctx: AgentContext,
}

impl FrontendDeveloperAgent {
    pub const ROLE: &'static str = "frontend_developer";

    pub fn new(ctx: AgentContext) -> Self {
        Self { ctx }
    }

    /// Implement user-facing components.
    pub fn implement_components(&self) -> Result<bool> {
        tracing::info!(role = Self::ROLE, "Implementing components");
        Ok(true)
    }

    /// Analyze interface usability.
    pub fn analyze_usability(&self) -> Result<bool> {
        tracing::info!(role = Self::ROLE, "Analyzing usability");
        Ok(true)
    }

    /// Automate the frontend test suite.
    pub fn automate_tests(&self) -> Result<bool> {
        tracing::info!(role = Self::ROLE, "Automating frontend tests");
        Ok(true)
    }

    pub async fn consult(&self, prompt: &str) -> Result<String> {
        self.ctx.consult(Self::ROLE, prompt).await
    }
}
