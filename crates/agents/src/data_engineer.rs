//! Data engineer agent.

use codecrew_core::Result;

use crate::context::AgentContext;

pub struct DataEngineerAgent {
    ctx: AgentContext,
}

impl DataEngineerAgent {
    pub const ROLE: &'static str = "data_engineer";

    pub fn new(ctx: AgentContext) -> Self {
        Self { ctx }
    }

    /// Build the data pipeline.
    pub fn build_pipeline(&self) -> Result<bool> {
        tracing::info!(role = Self::ROLE, "Building data pipeline");
        Ok(true)
    }

    /// Validate incoming data.
    pub fn validate_data(&self) -> Result<bool> {
        tracing::info!(role = Self::ROLE, "Validating data");
        Ok(true)
    }

    pub async fn consult(&self, prompt: &str) -> Result<String> {
        self.ctx.consult(Self::ROLE, prompt).await
    }
}
