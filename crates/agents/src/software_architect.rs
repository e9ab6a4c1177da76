//! Software architect agent.

use codecrew_core::Result;

use crate::context::AgentContext;

pub struct SoftwareArchitectAgent {
    ctx: AgentContext,
}

impl SoftwareArchitectAgent {
    pub const ROLE: &'static str = "software_architect";

    pub fn new(ctx: AgentContext) -> Self {
        Self { ctx }
    }

    /// Analyze the system requirements.
    pub fn analyze_requirements(&self) -> Result<bool> {
        tracing::info!(role = Self::ROLE, "Analyzing system requirements");
        Ok(true)
    }

    /// Design the system architecture.
    pub fn design_architecture(&self) -> Result<bool> {
        tracing::info!(role = Self::ROLE, "Designing system architecture");
        Ok(true)
    }

    /// Review code quality across the codebase.
    pub fn review_code_quality(&self) -> Result<bool> {
        tracing::info!(role = Self::ROLE, "Reviewing code quality");
        Ok(true)
    }

    /// Identify performance bottlenecks.
    pub fn identify_bottlenecks(&self) -> Result<bool> {
        tracing::info!(role = Self::ROLE, "Identifying bottlenecks");
        Ok(true)
    }

    pub async fn consult(&self, prompt: &str) -> Result<String> {
        self.ctx.consult(Self::ROLE, prompt).await
    }
}
