//! Tool contract.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::types::ToolSchema;

/// A named, schema-described action invocable with JSON keyword arguments.
///
/// `run` is the inner fallible operation. Callers go through the tool
/// registry, whose `execute` times the call and converts any `Err` into a
/// `ToolResult` with `success = false` — tool failures never cross the
/// registry boundary as errors.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique tool name.
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// Schema of the tool's formal parameters.
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with the given arguments.
    async fn run(&self, args: Value) -> Result<Value>;
}
