use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashMap;

// =============================================================================
// Tool Schema Types
// =============================================================================

/// JSON-schema type tag for a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
}

impl ParameterType {
    /// Wire-format name of the type tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterType::String => "string",
            ParameterType::Integer => "integer",
            ParameterType::Number => "number",
            ParameterType::Boolean => "boolean",
            ParameterType::Array => "array",
            ParameterType::Object => "object",
        }
    }
}

/// One formal parameter of a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name.
    pub name: String,

    /// Schema type tag.
    #[serde(rename = "type")]
    pub kind: ParameterType,

    /// Human-readable description.
    pub description: String,

    /// Whether the caller must supply the parameter.
    pub required: bool,

    /// Default value for optional parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Allowed values, rendered as an `enum` constraint.
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<String>>,
}

impl ToolParameter {
    /// Create a required parameter with the given type tag.
    pub fn new(name: impl Into<String>, kind: ParameterType, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            required: true,
            default: None,
            allowed: None,
        }
    }

    /// Create a required string parameter.
    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, ParameterType::String, description)
    }

    /// Create a required integer parameter.
    pub fn integer(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, ParameterType::Integer, description)
    }

    /// Create a required number parameter.
    pub fn number(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, ParameterType::Number, description)
    }

    /// Create a required boolean parameter.
    pub fn boolean(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, ParameterType::Boolean, description)
    }

    /// Create a required array parameter.
    pub fn array(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, ParameterType::Array, description)
    }

    /// Mark the parameter optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Supply a default value; a defaulted parameter is no longer required.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self.required = false;
        self
    }

    /// Constrain the parameter to a fixed set of values.
    pub fn with_allowed(mut self, allowed: Vec<String>) -> Self {
        self.allowed = Some(allowed);
        self
    }
}

/// Schema of a tool: name, description, and its ordered parameter list.
///
/// Built once at tool construction time and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Unique tool name.
    pub name: String,

    /// Human-readable description.
    pub description: String,

    /// Ordered formal parameters.
    #[serde(default)]
    pub parameters: Vec<ToolParameter>,
}

impl ToolSchema {
    /// Create a schema with no parameters.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    /// Append a parameter.
    pub fn with_parameter(mut self, parameter: ToolParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Append several parameters.
    pub fn with_parameters(mut self, parameters: impl IntoIterator<Item = ToolParameter>) -> Self {
        self.parameters.extend(parameters);
        self
    }

    /// Render the schema in the function-calling format LLM backends parse:
    ///
    /// ```json
    /// {"type": "function",
    ///  "function": {"name": ..., "description": ...,
    ///               "parameters": {"type": "object",
    ///                              "properties": {...},
    ///                              "required": [...]}}}
    /// ```
    pub fn to_function_calling(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &self.parameters {
            let mut prop = Map::new();
            prop.insert("type".into(), json!(param.kind.as_str()));
            prop.insert("description".into(), json!(param.description));
            if let Some(allowed) = &param.allowed {
                prop.insert("enum".into(), json!(allowed));
            }
            properties.insert(param.name.clone(), Value::Object(prop));

            if param.required {
                required.push(param.name.clone());
            }
        }

        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": {
                    "type": "object",
                    "properties": properties,
                    "required": required,
                }
            }
        })
    }
}

// =============================================================================
// Tool Result
// =============================================================================

/// Outcome of one tool invocation. Produced once, never mutated after return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Whether the invocation succeeded.
    pub success: bool,

    /// Return value on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,

    /// Human-readable failure description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Name of the tool that ran.
    pub tool_name: String,

    /// Wall-clock duration of the invocation in seconds.
    pub duration_secs: f64,

    /// Invocation extras.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, Value>,
}

impl ToolResult {
    /// Create a successful result.
    pub fn ok(tool_name: impl Into<String>, output: Value, duration_secs: f64) -> Self {
        Self {
            success: true,
            output: Some(output),
            error: None,
            tool_name: tool_name.into(),
            duration_secs,
            metadata: HashMap::new(),
        }
    }

    /// Create a failed result.
    pub fn failure(tool_name: impl Into<String>, error: impl Into<String>, duration_secs: f64) -> Self {
        Self {
            success: false,
            output: None,
            error: Some(error.into()),
            tool_name: tool_name.into(),
            duration_secs,
            metadata: HashMap::new(),
        }
    }

    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_calling_shape() {
        let schema = ToolSchema::new("search_code", "Search for patterns in code files")
            .with_parameter(ToolParameter::string("pattern", "The pattern to search for"))
            .with_parameter(
                ToolParameter::string("directory", "The directory to search in")
                    .with_default(json!(".")),
            )
            .with_parameter(
                ToolParameter::string("mode", "Match mode")
                    .with_allowed(vec!["plain".into(), "regex".into()]),
            );

        let rendered = schema.to_function_calling();
        assert_eq!(rendered["type"], "function");
        assert_eq!(rendered["function"]["name"], "search_code");

        let params = &rendered["function"]["parameters"];
        assert_eq!(params["type"], "object");
        assert_eq!(params["properties"]["pattern"]["type"], "string");
        assert_eq!(params["properties"]["mode"]["enum"], json!(["plain", "regex"]));
        // defaulted parameters are not required
        assert_eq!(params["required"], json!(["pattern", "mode"]));
    }

    #[test]
    fn test_tool_result_constructors() {
        let ok = ToolResult::ok("add", json!(5), 0.001);
        assert!(ok.success);
        assert_eq!(ok.output, Some(json!(5)));
        assert!(ok.error.is_none());

        let failed = ToolResult::failure("add", "missing argument", 0.0);
        assert!(!failed.success);
        assert!(failed.output.is_none());
        assert_eq!(failed.error.as_deref(), Some("missing argument"));
    }
}
