//! Backend developer agent.

use codecrew_core::Result;

use crate::context::AgentContext;

pub struct BackendDeveloperAgent {
    ctx: AgentContext,
}

impl BackendDeveloperAgent {
    pub const ROLE: &'static str = "backend_developer";

    pub fn new(ctx: AgentContext) -> Self {
        Self { ctx }
    }

    /// Implement server-side services.
    pub fn implement_services(&self) -> Result<bool> {
        tracing::info!(role = Self::ROLE, "Implementing services");
        Ok(true)
    }

    /// Analyze database structure and queries.
    pub fn analyze_database(&self) -> Result<bool> {
        tracing::info!(role = Self::ROLE, "Analyzing database");
        Ok(true)
    }

    /// Automate the backend test suite.
    pub fn automate_tests(&self) -> Result<bool> {
        tracing::info!(role = Self::ROLE, "Automating backend tests");
        Ok(true)
    }

    pub async fn consult(&self, prompt: &str) -> Result<String> {
        self.ctx.consult(Self::ROLE, prompt).await
    }
}
