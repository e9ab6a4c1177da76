//! Machine learning engineer agent.

use codecrew_core::Result;

use crate::context::AgentContext;

pub struct MachineLearningEngineerAgent {
    ctx: AgentContext,
}

impl MachineLearningEngineerAgent {
    pub const ROLE: &'static str = "ml_engineer";

    pub fn new(ctx: AgentContext) -> Self {
        Self { ctx }
    }

    /// Optimize a trained model.
    pub fn optimize_model(&self) -> Result<bool> {
        tracing::info!(role = Self::ROLE, "Optimizing model");
        Ok(true)
    }

    /// Deploy the model behind an API.
    pub fn deploy_model_api(&self) -> Result<bool> {
        tracing::info!(role = Self::ROLE, "Deploying model API");
        Ok(true)
    }

    /// Integrate the deployment with the rest of the system.
    pub fn integrate_deployment(&self) -> Result<bool> {
        tracing::info!(role = Self::ROLE, "Integrating deployment");
        Ok(true)
    }

    pub async fn consult(&self, prompt: &str) -> Result<String> {
        self.ctx.consult(Self::ROLE, prompt).await
    }
}
