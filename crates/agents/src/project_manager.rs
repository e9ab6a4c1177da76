//! Project manager agent.
//!
//! Oversees a software project end to end: initiates it, plans it, assigns
//! work to the other agents, and tracks progress. All operations are
//! scaffold stubs that log their step and report success; `consult` is the
//! one that actually drives the LLM.

use codecrew_core::Result;

use crate::context::AgentContext;

pub struct ProjectManagerAgent {
    ctx: AgentContext,
}

impl ProjectManagerAgent {
    pub const ROLE: &'static str = "project_manager";

    pub fn new(ctx: AgentContext) -> Self {
        Self { ctx }
    }

    /// Kick off a new project.
    pub fn initiate_project(&self, name: &str) -> Result<bool> {
        tracing::info!(role = Self::ROLE, project = name, "Initiating project");
        Ok(true)
    }

    /// Draft the project plan.
    pub fn create_project_plan(&self) -> Result<bool> {
        tracing::info!(role = Self::ROLE, "Creating project plan");
        Ok(true)
    }

    /// Assign tasks to the other agents.
    pub fn assign_tasks(&self) -> Result<bool> {
        tracing::info!(role = Self::ROLE, "Assigning tasks to agents");
        Ok(true)
    }

    /// Track the agents' progress.
    pub fn monitor_progress(&self) -> Result<bool> {
        tracing::info!(role = Self::ROLE, "Monitoring progress");
        Ok(true)
    }

    /// Identify potential risks and delays.
    pub fn analyze_risks(&self) -> Result<bool> {
        tracing::info!(role = Self::ROLE, "Analyzing project risks");
        Ok(true)
    }

    /// Evaluate whether the project met its goals.
    pub fn evaluate_success(&self) -> Result<bool> {
        tracing::info!(role = Self::ROLE, "Evaluating project success");
        Ok(true)
    }

    /// Ask the team's LLM for advice.
    pub async fn consult(&self, prompt: &str) -> Result<String> {
        self.ctx.consult(Self::ROLE, prompt).await
    }
}
