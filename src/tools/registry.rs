//! Tool registry
//!
//! An explicit table of tools keyed by name. The invocation layer looks tools up
//! here and publishes their definitions; there is no reflection involved.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use super::file_tools::{DeleteFileTool, ListFilesTool, ReadFileTool, WriteFileTool};
use super::tool::{Tool, ToolDefinition, ToolResult};

/// A request to run a tool, as produced by an agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    /// Either a JSON object or a JSON-encoded string of one
    pub arguments: Value,
}

impl ToolCall {
    /// The arguments as a JSON object, decoding them if they arrived as a string
    pub fn parsed_arguments(&self) -> Result<Value> {
        match &self.arguments {
            Value::String(raw) if raw.trim().is_empty() => Ok(Value::Object(Default::default())),
            Value::String(raw) => serde_json::from_str(raw)
                .with_context(|| format!("Invalid arguments for tool call '{}'", self.name)),
            other => Ok(other.clone()),
        }
    }
}

/// Registry of available tools
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the four file tools
    pub fn with_file_tools() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(ReadFileTool::new()));
        registry.register(Arc::new(WriteFileTool::new()));
        registry.register(Arc::new(ListFilesTool::new()));
        registry.register(Arc::new(DeleteFileTool::new()));
        registry
    }

    /// Register a tool under its own name, replacing any previous tool of that name
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_some() {
            tracing::warn!("Replacing previously registered tool: {}", name);
        } else {
            tracing::debug!("Registered tool: {}", name);
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Registered tool names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Capability descriptors for every registered tool, sorted by name
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut definitions: Vec<ToolDefinition> =
            self.tools.values().map(|t| t.definition()).collect();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    /// Run the named tool
    pub async fn execute(&self, name: &str, input: &Value) -> Result<ToolResult> {
        let tool = self
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown tool: {}", name))?;

        let info = tool.get_info(input);
        tracing::info!("Executing tool {}: {}", name, info.action_description);

        let result = tool.execute(input).await?;
        if result.is_error {
            tracing::warn!("Tool {} returned an error: {}", name, result.to_text());
        }
        Ok(result)
    }

    /// Run a tool call produced by an agent
    pub async fn execute_call(&self, call: &ToolCall) -> Result<ToolResult> {
        let arguments = call.parsed_arguments()?;
        self.execute(&call.name, &arguments).await
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}
