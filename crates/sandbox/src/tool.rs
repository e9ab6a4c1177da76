//! The `execute_code` tool.

use async_trait::async_trait;
use serde_json::{json, Value};

use codecrew_core::{
    traits::Tool,
    types::{ToolParameter, ToolSchema},
    Error, Result,
};

use crate::filter::SecurityFilter;
use crate::interp;

/// Sandboxed dynamic-code-execution tool.
///
/// Two mandatory, ordered stages: the static [`SecurityFilter`] refuses
/// scripts containing forbidden constructs before anything runs, then the
/// restricted interpreter executes the remainder with nothing but the
/// allow-listed builtins. Both rejection and runtime faults reach registry
/// callers as a `ToolResult` with `success = false` — never an exception
/// and never a crash.
///
/// There is no internal time or memory cap on a running script.
pub struct ExecuteCodeTool {
    filter: SecurityFilter,
}

impl ExecuteCodeTool {
    /// Create the tool with the fixed forbidden-pattern list.
    pub fn new() -> Self {
        Self {
            filter: SecurityFilter::new(),
        }
    }
}

impl Default for ExecuteCodeTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for ExecuteCodeTool {
    fn name(&self) -> &str {
        "execute_code"
    }

    fn description(&self) -> &str {
        "Execute a restricted script and return the value of its `result` \
         variable. Only arithmetic, lists, comparisons, aggregation builtins \
         and print() are available; print output is captured and returned."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(self.name(), self.description())
            .with_parameter(ToolParameter::string("code", "The code to execute"))
    }

    async fn run(&self, args: Value) -> Result<Value> {
        let code = args
            .get("code")
            .and_then(|value| value.as_str())
            .ok_or_else(|| Error::invalid_request("code is required"))?;

        self.filter.check(code)?;

        let outcome = interp::execute(code)?;
        tracing::debug!(
            stdout_bytes = outcome.stdout.len(),
            has_result = outcome.result.is_some(),
            "Sandboxed script completed"
        );

        let result = outcome
            .result
            .as_ref()
            .map(Value::from)
            .unwrap_or(Value::Null);

        Ok(json!({
            "result": result,
            "stdout": outcome.stdout,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_runs_script_and_reports_result() {
        let tool = ExecuteCodeTool::new();
        let output = tool
            .run(json!({"code": "result = 2 + 2"}))
            .await
            .unwrap();

        assert_eq!(output["result"], json!(4));
        assert_eq!(output["stdout"], json!(""));
    }

    #[tokio::test]
    async fn test_captures_stdout() {
        let tool = ExecuteCodeTool::new();
        let output = tool
            .run(json!({"code": "print('working')\nresult = True"}))
            .await
            .unwrap();

        assert_eq!(output["stdout"], json!("working\n"));
        assert_eq!(output["result"], json!(true));
    }

    #[tokio::test]
    async fn test_forbidden_script_is_refused_before_running() {
        let tool = ExecuteCodeTool::new();
        let err = tool
            .run(json!({"code": "import os\nresult = 1"}))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::SecurityViolation(_)));
    }

    #[tokio::test]
    async fn test_runtime_fault_is_error_not_panic() {
        let tool = ExecuteCodeTool::new();
        let err = tool.run(json!({"code": "result = 1 / 0"})).await.unwrap_err();
        assert!(err.to_string().contains("division by zero"));
    }

    #[tokio::test]
    async fn test_missing_code_argument() {
        let tool = ExecuteCodeTool::new();
        let err = tool.run(json!({})).await.unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }
}
