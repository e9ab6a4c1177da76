//! Tools built from plain functions.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

use codecrew_core::{
    traits::Tool,
    types::{ToolParameter, ToolSchema},
    Error, Result,
};

use crate::derive::derive_parameters;

type Handler = Box<dyn Fn(Value) -> Result<Value> + Send + Sync>;

/// A tool wrapping a plain function.
///
/// Two construction paths:
/// - [`FunctionTool::new`] with an explicit parameter list, for tools whose
///   schema is written out by hand;
/// - [`FunctionTool::from_typed`] with a typed argument struct, deriving the
///   parameter list from the struct's JSON schema and deserializing the
///   incoming arguments before the function runs.
pub struct FunctionTool {
    name: String,
    description: String,
    parameters: Vec<ToolParameter>,
    handler: Handler,
}

impl FunctionTool {
    /// Create a tool from an explicit parameter list and a handler taking
    /// raw JSON arguments.
    pub fn new<F>(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Vec<ToolParameter>,
        handler: F,
    ) -> Self
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            handler: Box::new(handler),
        }
    }

    /// Create a tool whose parameter list is derived from `A` and whose
    /// handler receives the deserialized arguments.
    ///
    /// Fields without a `serde` default are required; defaulted fields are
    /// optional and carry their default into the schema.
    pub fn from_typed<A, F>(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: F,
    ) -> Self
    where
        A: JsonSchema + DeserializeOwned,
        F: Fn(A) -> Result<Value> + Send + Sync + 'static,
    {
        let parameters = derive_parameters::<A>();
        Self::new(name, description, parameters, move |args: Value| {
            let typed: A = serde_json::from_value(args)
                .map_err(|e| Error::invalid_request(format!("invalid arguments: {e}")))?;
            handler(typed)
        })
    }
}

#[async_trait]
impl Tool for FunctionTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(&self.name, &self.description)
            .with_parameters(self.parameters.iter().cloned())
    }

    async fn run(&self, args: Value) -> Result<Value> {
        (self.handler)(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn default_b() -> i64 {
        5
    }

    #[derive(Debug, Deserialize, JsonSchema)]
    struct AddArgs {
        a: i64,
        #[serde(default = "default_b")]
        b: i64,
    }

    #[tokio::test]
    async fn test_typed_tool_executes() {
        let tool = FunctionTool::from_typed::<AddArgs, _>("add", "Add two integers", |args| {
            Ok(json!(args.a + args.b))
        });

        let output = tool.run(json!({"a": 2, "b": 3})).await.unwrap();
        assert_eq!(output, json!(5));
    }

    #[tokio::test]
    async fn test_typed_tool_applies_defaults() {
        let tool = FunctionTool::from_typed::<AddArgs, _>("add", "Add two integers", |args| {
            Ok(json!(args.a + args.b))
        });

        let output = tool.run(json!({"a": 2})).await.unwrap();
        assert_eq!(output, json!(7));
    }

    #[tokio::test]
    async fn test_typed_tool_rejects_bad_arguments() {
        let tool = FunctionTool::from_typed::<AddArgs, _>("add", "Add two integers", |args| {
            Ok(json!(args.a + args.b))
        });

        let err = tool.run(json!({"a": "two"})).await.unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[test]
    fn test_typed_tool_schema() {
        let tool = FunctionTool::from_typed::<AddArgs, _>("add", "Add two integers", |args| {
            Ok(json!(args.a + args.b))
        });

        let schema = tool.schema();
        assert_eq!(schema.name, "add");
        assert_eq!(schema.parameters.len(), 2);

        let a = schema.parameters.iter().find(|p| p.name == "a").unwrap();
        assert!(a.required);
        let b = schema.parameters.iter().find(|p| p.name == "b").unwrap();
        assert!(!b.required);
        assert_eq!(b.default, Some(json!(5)));
    }

    #[tokio::test]
    async fn test_explicit_tool() {
        let tool = FunctionTool::new(
            "greet",
            "Greet a person",
            vec![ToolParameter::string("name", "Who to greet")],
            |args| {
                let name = args
                    .get("name")
                    .and_then(|value| value.as_str())
                    .ok_or_else(|| Error::invalid_request("name is required"))?;
                Ok(json!(format!("Hello, {name}!")))
            },
        );

        let output = tool.run(json!({"name": "Ada"})).await.unwrap();
        assert_eq!(output, json!("Hello, Ada!"));
    }
}
