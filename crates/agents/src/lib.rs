#![deny(unused)]
//! Role agents for the CodeCrew software-team scaffold.
//!
//! Ten role-named agents over a shared [`AgentContext`]: each resolves the
//! team's LLM provider and tool registry from the service container by
//! their well-known names and exposes its role operations as scaffold
//! stubs. The business logic lives elsewhere; this crate is the wiring the
//! rest of the system composes against.

pub mod backend_developer;
pub mod context;
pub mod data_engineer;
pub mod data_scientist;
pub mod devops_engineer;
pub mod frontend_developer;
pub mod ml_engineer;
pub mod project_manager;
pub mod qa_engineer;
pub mod security_engineer;
pub mod software_architect;

pub use backend_developer::BackendDeveloperAgent;
pub use context::{AgentContext, LLM_PROVIDER_SERVICE, TOOL_REGISTRY_SERVICE};
pub use data_engineer::DataEngineerAgent;
pub use data_scientist::DataScientistAgent;
pub use devops_engineer::DevOpsEngineerAgent;
pub use frontend_developer::FrontendDeveloperAgent;
pub use ml_engineer::MachineLearningEngineerAgent;
pub use project_manager::ProjectManagerAgent;
pub use qa_engineer::QualityAssuranceEngineerAgent;
pub use security_engineer::SecurityEngineerAgent;
pub use software_architect::SoftwareArchitectAgent;
