//! Built-in coding tools.

use async_trait::async_trait;
use regex::Regex;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;

use codecrew_core::{
    traits::Tool,
    types::{ToolParameter, ToolSchema},
    Error, Result,
};
use codecrew_sandbox::ExecuteCodeTool;

use crate::registry::ToolRegistry;

const DEFAULT_ENCODING: &str = "utf-8";

fn check_encoding(args: &Value) -> Result<()> {
    let encoding = args
        .get("encoding")
        .and_then(|value| value.as_str())
        .unwrap_or(DEFAULT_ENCODING);
    if encoding.eq_ignore_ascii_case("utf-8") || encoding.eq_ignore_ascii_case("utf8") {
        Ok(())
    } else {
        Err(Error::tool_execution(format!(
            "unsupported encoding '{encoding}' (only utf-8 is available)"
        )))
    }
}

// =============================================================================
// Read File Tool
// =============================================================================

/// Tool for reading file contents.
pub struct ReadFileTool;

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read the contents of a file"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(self.name(), self.description())
            .with_parameter(ToolParameter::string("path", "The path to the file to read"))
            .with_parameter(
                ToolParameter::string("encoding", "The file encoding (default: utf-8)")
                    .with_default(json!(DEFAULT_ENCODING)),
            )
    }

    async fn run(&self, args: Value) -> Result<Value> {
        let path = args
            .get("path")
            .and_then(|value| value.as_str())
            .ok_or_else(|| Error::invalid_request("path is required"))?;
        check_encoding(&args)?;

        let content = tokio::fs::read_to_string(path).await?;
        Ok(json!(content))
    }
}

// =============================================================================
// Write File Tool
// =============================================================================

/// Tool for writing file contents.
pub struct WriteFileTool;

#[async_trait]
impl Tool for WriteFileTool {
    fn name(&self) -> &str {
        "write_file"
    }

    fn description(&self) -> &str {
        "Write content to a file"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(self.name(), self.description())
            .with_parameter(ToolParameter::string("path", "The path to the file to write"))
            .with_parameter(ToolParameter::string("content", "The content to write"))
            .with_parameter(
                ToolParameter::string("encoding", "The file encoding (default: utf-8)")
                    .with_default(json!(DEFAULT_ENCODING)),
            )
    }

    async fn run(&self, args: Value) -> Result<Value> {
        let path = args
            .get("path")
            .and_then(|value| value.as_str())
            .ok_or_else(|| Error::invalid_request("path is required"))?;
        let content = args
            .get("content")
            .and_then(|value| value.as_str())
            .ok_or_else(|| Error::invalid_request("content is required"))?;
        check_encoding(&args)?;

        tokio::fs::write(path, content).await?;
        Ok(json!(true))
    }
}

// =============================================================================
// Search Code Tool
// =============================================================================

/// Tool for searching code files with a regex pattern.
pub struct SearchCodeTool;

impl SearchCodeTool {
    fn search_directory(
        regex: &Regex,
        directory: &Path,
        extensions: &[String],
        results: &mut Vec<Value>,
    ) -> Result<()> {
        for entry in std::fs::read_dir(directory)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                Self::search_directory(regex, &path, extensions, results)?;
                continue;
            }

            let file_name = path.to_string_lossy();
            if !extensions.iter().any(|ext| file_name.ends_with(ext.as_str())) {
                continue;
            }

            // Unreadable or non-text files are skipped, not fatal.
            let Ok(content) = std::fs::read_to_string(&path) else {
                continue;
            };
            for (index, line) in content.lines().enumerate() {
                if regex.is_match(line) {
                    results.push(json!({
                        "file": file_name,
                        "line": index + 1,
                        "content": line.trim(),
                    }));
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Tool for SearchCodeTool {
    fn name(&self) -> &str {
        "search_code"
    }

    fn description(&self) -> &str {
        "Search for patterns in code files"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(self.name(), self.description())
            .with_parameter(ToolParameter::string("pattern", "The pattern to search for"))
            .with_parameter(
                ToolParameter::string("directory", "The directory to search in")
                    .with_default(json!(".")),
            )
            .with_parameter(
                ToolParameter::array("extensions", "File extensions to search (e.g. [\".rs\"])")
                    .with_default(json!([".rs"])),
            )
    }

    async fn run(&self, args: Value) -> Result<Value> {
        let pattern = args
            .get("pattern")
            .and_then(|value| value.as_str())
            .ok_or_else(|| Error::invalid_request("pattern is required"))?;
        let directory = args
            .get("directory")
            .and_then(|value| value.as_str())
            .unwrap_or(".")
            .to_string();
        let extensions: Vec<String> = args
            .get("extensions")
            .and_then(|value| value.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_else(|| vec![".rs".to_string()]);

        let regex = Regex::new(pattern)
            .map_err(|e| Error::invalid_request(format!("invalid pattern: {e}")))?;

        let mut results = Vec::new();
        Self::search_directory(&regex, Path::new(&directory), &extensions, &mut results)?;
        Ok(Value::Array(results))
    }
}

// =============================================================================
// Default Registry
// =============================================================================

/// Create a registry pre-loaded with the built-in coding tools.
pub fn default_registry() -> Result<ToolRegistry> {
    let registry = ToolRegistry::new();
    registry.register_in(Arc::new(ReadFileTool), "coding")?;
    registry.register_in(Arc::new(WriteFileTool), "coding")?;
    registry.register_in(Arc::new(SearchCodeTool), "coding")?;
    registry.register_in(Arc::new(ExecuteCodeTool::new()), "coding")?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        let path = path.to_string_lossy().to_string();

        let write = WriteFileTool;
        let output = write
            .run(json!({"path": path, "content": "hello"}))
            .await
            .unwrap();
        assert_eq!(output, json!(true));

        let read = ReadFileTool;
        let output = read.run(json!({"path": path})).await.unwrap();
        assert_eq!(output, json!("hello"));
    }

    #[tokio::test]
    async fn test_read_missing_file_is_error() {
        let read = ReadFileTool;
        let err = read
            .run(json!({"path": "/nonexistent/definitely-missing.txt"}))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[tokio::test]
    async fn test_unsupported_encoding() {
        let read = ReadFileTool;
        let err = read
            .run(json!({"path": "whatever.txt", "encoding": "latin-1"}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("unsupported encoding"));
    }

    #[tokio::test]
    async fn test_search_code_finds_matches() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("lib.rs"), "fn main() {}\nstruct Foo;\n")
            .await
            .unwrap();
        tokio::fs::write(dir.path().join("notes.md"), "fn main in prose\n")
            .await
            .unwrap();

        let search = SearchCodeTool;
        let output = search
            .run(json!({
                "pattern": r"fn\s+main",
                "directory": dir.path().to_string_lossy(),
            }))
            .await
            .unwrap();

        let matches = output.as_array().unwrap();
        // the .md file is outside the default extension list
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0]["line"], json!(1));
        assert_eq!(matches[0]["content"], json!("fn main() {}"));
    }

    #[tokio::test]
    async fn test_default_registry_contents() {
        let registry = default_registry().unwrap();
        assert_eq!(
            registry.list_tools(Some("coding")),
            vec!["execute_code", "read_file", "search_code", "write_file"]
        );

        let result = registry
            .execute("execute_code", json!({"code": "result = 6 * 7"}))
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(result.output.unwrap()["result"], json!(42));
    }
}
