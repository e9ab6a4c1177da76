//! Tool registry implementation.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

use codecrew_core::{
    traits::Tool,
    types::{ToolResult, ToolSchema},
    Error, Result,
};

/// Category used when the caller does not name one.
pub const DEFAULT_CATEGORY: &str = "general";

/// Name-keyed registry of tools with a many-to-many category index.
///
/// `execute` is the capture boundary: it times the call and folds any error
/// from the tool's `run` into a `ToolResult` with `success = false`, so a
/// caller iterating over tool calls always receives one result per call and
/// never needs its own exception handling. The only error `execute` itself
/// returns is `ToolNotFound`.
///
/// Duplicate tool names are rejected, never overwritten.
pub struct ToolRegistry {
    tools: DashMap<String, Arc<dyn Tool>>,
    categories: DashMap<String, BTreeSet<String>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tools: DashMap::new(),
            categories: DashMap::new(),
        }
    }

    /// Register a tool under the default category.
    pub fn register(&self, tool: Arc<dyn Tool>) -> Result<()> {
        self.register_in(tool, DEFAULT_CATEGORY)
    }

    /// Register a tool under the given category.
    ///
    /// Fails with `DuplicateTool` if the name is already taken.
    pub fn register_in(&self, tool: Arc<dyn Tool>, category: &str) -> Result<()> {
        let name = tool.name().to_string();
        match self.tools.entry(name.clone()) {
            Entry::Occupied(_) => return Err(Error::DuplicateTool(name)),
            Entry::Vacant(vacant) => {
                vacant.insert(tool);
            }
        }

        tracing::info!(tool = %name, category = %category, "Registering tool");
        self.categories
            .entry(category.to_string())
            .or_default()
            .insert(name);
        Ok(())
    }

    /// Remove a tool and drop it from every category.
    pub fn unregister(&self, name: &str) -> Result<()> {
        self.tools
            .remove(name)
            .ok_or_else(|| Error::tool_not_found(name))?;
        self.categories.retain(|_category, names| {
            names.remove(name);
            !names.is_empty()
        });
        Ok(())
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).map(|entry| entry.value().clone())
    }

    /// Execute a tool by name.
    ///
    /// Returns `ToolNotFound` for unknown names; every other outcome —
    /// including a failing tool — is a `ToolResult`.
    pub async fn execute(&self, name: &str, args: Value) -> Result<ToolResult> {
        let tool = self.get(name).ok_or_else(|| Error::tool_not_found(name))?;

        tracing::debug!(tool = %name, "Executing tool");
        let started = Instant::now();
        let outcome = tool.run(args).await;
        let duration_secs = started.elapsed().as_secs_f64();

        match outcome {
            Ok(output) => Ok(ToolResult::ok(name, output, duration_secs)),
            Err(error) => {
                tracing::warn!(tool = %name, error = %error, "Tool execution failed");
                Ok(ToolResult::failure(name, error.to_string(), duration_secs))
            }
        }
    }

    /// Names of registered tools, optionally restricted to one category.
    pub fn list_tools(&self, category: Option<&str>) -> Vec<String> {
        match category {
            Some(category) => self
                .categories
                .get(category)
                .map(|names| names.iter().cloned().collect())
                .unwrap_or_default(),
            None => {
                let mut names: Vec<String> =
                    self.tools.iter().map(|entry| entry.key().clone()).collect();
                names.sort();
                names
            }
        }
    }

    /// Names of every category with at least one tool.
    pub fn list_categories(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .categories
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        names
    }

    /// Schema of one tool.
    pub fn schema(&self, name: &str) -> Result<ToolSchema> {
        self.get(name)
            .map(|tool| tool.schema())
            .ok_or_else(|| Error::tool_not_found(name))
    }

    /// Schemas of every tool, optionally restricted to one category.
    pub fn all_schemas(&self, category: Option<&str>) -> Vec<ToolSchema> {
        self.list_tools(category)
            .iter()
            .filter_map(|name| self.get(name).map(|tool| tool.schema()))
            .collect()
    }

    /// Render every tool's schema in the function-calling format consumed
    /// by LLM backends, optionally restricted to one category.
    pub fn to_function_calling_format(&self, category: Option<&str>) -> Vec<Value> {
        self.all_schemas(category)
            .iter()
            .map(ToolSchema::to_function_calling)
            .collect()
    }

    /// Remove every tool and category. Test harnesses only.
    pub fn clear(&self) {
        self.tools.clear();
        self.categories.clear();
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
