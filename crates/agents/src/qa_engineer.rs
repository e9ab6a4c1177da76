//! Quality assurance engineer agent.

use codecrew_core::Result;

use crate::context::AgentContext;

pub struct QualityAssuranceEngineerAgent {
    ctx: AgentContext,
}

impl QualityAssuranceEngineerAgent {
    pub const ROLE: &'static str = "qa_engineer";

    pub fn new(ctx: AgentContext) -> Self {
        Self { ctx }
    }

    /// Create the test plan.
    pub fn create_test_plan(&self) -> Result<bool> {
        tracing::info!(role = Self::ROLE, "Creating test plan");
        Ok(true)
    }

    /// Execute the planned tests.
    pub fn execute_tests(&self) -> Result<bool> {
        tracing::info!(role = Self::ROLE, "Executing tests");
        Ok(true)
    }

    /// Report the test results.
    pub fn report_results(&self) -> Result<bool> {
        tracing::info!(role = Self::ROLE, "Reporting test results");
        Ok(true)
    }

    pub async fn consult(&self, prompt: &str) -> Result<String> {
        self.ctx.consult(Self::ROLE, prompt).await
    }
}
