//! Request and response types for the Letta REST API
//!
//! Only the fields this crate reads or sends are modeled; unknown response fields
//! are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tools::{ToolDefinition, ToolInputSchema};

// ============================================================================
// Agents
// ============================================================================

/// A labeled memory block attached to an agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryBlock {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl MemoryBlock {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            limit: None,
            id: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentMemory {
    #[serde(default)]
    pub blocks: Vec<MemoryBlock>,
}

/// Summary of a tool attached to an agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachedTool {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub model: Option<String>,
}

/// Agent as returned by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub llm_config: Option<LlmConfig>,
    #[serde(default)]
    pub memory: AgentMemory,
    #[serde(default)]
    pub tools: Vec<AttachedTool>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl AgentState {
    /// Model handle, from either the top-level field or the LLM config
    pub fn model_name(&self) -> Option<&str> {
        self.model
            .as_deref()
            .or_else(|| self.llm_config.as_ref().and_then(|c| c.model.as_deref()))
    }

    pub fn tool_ids(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.id.clone()).collect()
    }

    pub fn block(&self, label: &str) -> Option<&MemoryBlock> {
        self.memory.blocks.iter().find(|b| b.label == label)
    }
}

/// Body for creating an agent
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateAgent {
    pub name: String,
    pub model: String,
    pub embedding: String,
    pub memory_blocks: Vec<MemoryBlock>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tool_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Body for updating an agent; unset fields are left unchanged
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateAgent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_ids: Option<Vec<String>>,
}

// ============================================================================
// Tools
// ============================================================================

/// Body for creating or upserting a server-side tool
#[derive(Debug, Clone, Default, Serialize)]
pub struct ToolCreate {
    pub source_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
}

/// A tool registered on the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

// ============================================================================
// Passages (archival memory)
// ============================================================================

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreatePassage {
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassageSearchResult {
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassageSearchResponse {
    #[serde(default)]
    pub results: Vec<PassageSearchResult>,
    #[serde(default)]
    pub count: usize,
}

// ============================================================================
// Messages
// ============================================================================

/// Result of a client-side tool, sent back in answer to an approval request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolReturn {
    #[serde(rename = "type")]
    pub return_type: String,
    pub tool_call_id: String,
    pub tool_return: String,
    pub status: String,
}

impl ToolReturn {
    pub fn new(tool_call_id: impl Into<String>, tool_return: impl Into<String>, is_error: bool) -> Self {
        Self {
            return_type: "tool".to_string(),
            tool_call_id: tool_call_id.into(),
            tool_return: tool_return.into(),
            status: if is_error { "error" } else { "success" }.to_string(),
        }
    }
}

/// One input item of a message request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageInput {
    Message { role: String, content: String },
    Approval { approvals: Vec<ToolReturn> },
}

impl MessageInput {
    pub fn user(content: impl Into<String>) -> Self {
        MessageInput::Message {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Client tool offered with a message request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientTool {
    pub name: String,
    pub description: String,
    pub parameters: ToolInputSchema,
}

impl From<ToolDefinition> for ClientTool {
    fn from(definition: ToolDefinition) -> Self {
        Self {
            name: definition.name,
            description: definition.description,
            parameters: definition.input_schema,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageCreate {
    pub messages: Vec<MessageInput>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub client_tools: Vec<ClientTool>,
}

/// Text content, either a plain string or a list of text parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageText {
    Text(String),
    Parts(Vec<TextPart>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPart {
    #[serde(default)]
    pub text: String,
}

impl MessageText {
    pub fn as_text(&self) -> String {
        match self {
            MessageText::Text(text) => text.clone(),
            MessageText::Parts(parts) => parts
                .iter()
                .map(|p| p.text.as_str())
                .collect::<Vec<_>>()
                .join(""),
        }
    }
}

/// A tool call made by the agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallPayload {
    pub name: String,
    /// JSON-encoded arguments
    #[serde(default)]
    pub arguments: String,
    pub tool_call_id: String,
}

/// A message produced during an agent turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "message_type", rename_all = "snake_case")]
pub enum LettaMessage {
    AssistantMessage {
        content: MessageText,
    },
    ReasoningMessage {
        #[serde(default)]
        reasoning: String,
    },
    ToolCallMessage {
        tool_call: ToolCallPayload,
    },
    ToolReturnMessage {
        #[serde(default)]
        tool_return: String,
        #[serde(default)]
        status: Option<String>,
    },
    ApprovalRequestMessage {
        tool_call: ToolCallPayload,
    },
    UserMessage {
        content: MessageText,
    },
    SystemMessage {
        content: MessageText,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LettaResponse {
    #[serde(default)]
    pub messages: Vec<LettaMessage>,
    #[serde(default)]
    pub stop_reason: Option<Value>,
}

impl LettaResponse {
    /// Concatenated assistant text of this response
    pub fn assistant_text(&self) -> String {
        self.messages
            .iter()
            .filter_map(|m| match m {
                LettaMessage::AssistantMessage { content } => Some(content.as_text()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Pending approval requests, in order; empty when the turn is complete
    pub fn approval_requests(&self) -> Vec<&ToolCallPayload> {
        self.messages
            .iter()
            .filter_map(|m| match m {
                LettaMessage::ApprovalRequestMessage { tool_call } => Some(tool_call),
                _ => None,
            })
            .collect()
    }
}
