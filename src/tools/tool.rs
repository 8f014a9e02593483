//! Tool trait definition
//!
//! All tools implement this trait to provide a consistent interface, and publish a
//! [`ToolDefinition`] describing their name, parameters, result and error set.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON schema for a tool's input object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInputSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl ToolInputSchema {
    /// An object schema with the given properties and required names
    pub fn object(properties: Value, required: &[&str]) -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: Some(properties),
            required: required.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Capability descriptor for a tool
///
/// This is what an invocation layer binds to: the name, the typed parameters, the
/// type of a successful result and the error kinds a call can report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: ToolInputSchema,
    /// JSON schema of a successful result
    pub returns: Value,
    /// Error kinds this tool can report
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Content type for tool results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ToolResultData {
    /// Text content
    Text(String),
    /// A list of strings, e.g. a directory listing
    List(Vec<String>),
}

/// Result of executing a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// The content of the tool result
    pub content: ToolResultData,
    /// Whether the tool execution resulted in an error
    pub is_error: bool,
    /// Error kind name, for failed executions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
}

impl ToolResult {
    /// Create a successful tool result with text content
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            content: ToolResultData::Text(output.into()),
            is_error: false,
            error_kind: None,
        }
    }

    /// Create a successful tool result with list content
    pub fn list(items: Vec<String>) -> Self {
        Self {
            content: ToolResultData::List(items),
            is_error: false,
            error_kind: None,
        }
    }

    /// Create an error tool result
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: ToolResultData::Text(message.into()),
            is_error: true,
            error_kind: None,
        }
    }

    /// Attach an error kind name
    pub fn with_error_kind(mut self, kind: impl Into<String>) -> Self {
        self.error_kind = Some(kind.into());
        self
    }

    /// Render the content as a single string for returning to an agent
    ///
    /// Lists are rendered as a JSON array.
    pub fn to_text(&self) -> String {
        match &self.content {
            ToolResultData::Text(text) => text.clone(),
            ToolResultData::List(items) => {
                serde_json::to_string(items).unwrap_or_else(|_| items.join("\n"))
            }
        }
    }
}

/// Information about a tool invocation, for logging and approval prompts
#[derive(Debug, Clone)]
pub struct ToolInfo {
    /// Name of the tool
    pub name: String,
    /// Human-readable description of what this invocation will do
    pub action_description: String,
    /// Additional details about the action
    pub details: Option<String>,
}

/// Trait for tools that an agent can use
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the name of this tool
    fn name(&self) -> &str;

    /// Get a description of this tool
    fn description(&self) -> &str;

    /// Get the capability descriptor for this tool
    fn definition(&self) -> ToolDefinition;

    /// Get information about what this tool invocation will do
    fn get_info(&self, input: &Value) -> ToolInfo;

    /// Execute the tool with the given input
    ///
    /// The input is a JSON value that matches the tool's input schema. Input that
    /// does not deserialize is an `Err`; failures of the operation itself are
    /// reported as an error [`ToolResult`].
    async fn execute(&self, input: &Value) -> Result<ToolResult>;

    /// Check if this tool changes state and should be confirmed before execution
    ///
    /// Default is true - tools should generally require permission.
    fn requires_permission(&self) -> bool {
        true
    }
}
