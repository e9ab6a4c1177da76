//! Security engineer agent.
//!
//! Assesses the project's security posture and recommends improvements.
//! Like the other scaffold roles, the operations log their step and report
//! success; real assessments would route through the tool registry.

use codecrew_core::Result;

use crate::context::AgentContext;

pub struct SecurityEngineerAgent {
    ctx: AgentContext,
}

impl SecurityEngineerAgent {
    pub const ROLE: &'static str = "security_engineer";

    pub fn new(ctx: AgentContext) -> Self {
        Self { ctx }
    }

    /// Assess the current security posture.
    pub fn assess_security(&self) -> Result<bool> {
        tracing::info!(role = Self::ROLE, "Assessing security posture");
        Ok(true)
    }

    /// Recommend security improvements.
    pub fn recommend_improvements(&self) -> Result<bool> {
        tracing::info!(role = Self::ROLE, "Recommending security improvements");
        Ok(true)
    }

    pub async fn consult(&self, prompt: &str) -> Result<String> {
        self.ctx.consult(Self::ROLE, prompt).await
    }
}
