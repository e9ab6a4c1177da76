//! DevOps engineer agent.

use codecrew_core::Result;

use crate::context::AgentContext;

pub struct DevOpsEngineerAgent {
    ctx: AgentContext,
}

impl DevOpsEngineerAgent {
    pub const ROLE: &'static str = "devops_engineer";

    pub fn new(ctx: AgentContext) -> Self {
        Self { ctx }
    }

    /// Automate the deployment pipeline.
    pub fn automate_deployment(&self) -> Result<bool> {
        tracing::info!(role = Self::ROLE, "Automating deployment");
        Ok(true)
    }

    /// Configure monitoring and alerting.
    pub fn configure_monitoring(&self) -> Result<bool> {
        tracing::info!(role = Self::ROLE, "Configuring monitoring and alerting");
        Ok(true)
    }

    pub async fn consult(&self, prompt: &str) -> Result<String> {
        self.ctx.consult(Self::ROLE, prompt).await
    }
}
