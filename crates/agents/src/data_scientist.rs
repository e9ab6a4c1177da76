//! Data scientist agent.

use codecrew_core::Result;

use crate::context::AgentContext;

pub struct DataScientistAgent {
    ctx: AgentContext,
}

impl DataScientistAgent {
    pub const ROLE: &'static str = "data_scientist";

    pub fn new(ctx: AgentContext) -> Self {
        Self { ctx }
    }

    /// Implement an analytical model.
    pub fn implement_model(&self) -> Result<bool> {
        tracing::info!(role = Self::ROLE, "Implementing model");
        Ok(true)
    }

    /// Create visualizations of the findings.
    pub fn create_visualizations(&self) -> Result<bool> {
        tracing::info!(role = Self::ROLE, "Creating visualizations");
        Ok(true)
    }

    pub async fn consult(&self, prompt: &str) -> Result<String> {
        self.ctx.consult(Self::ROLE, prompt).await
    }
}
