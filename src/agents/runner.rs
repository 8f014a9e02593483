//! Client-side tool loop
//!
//! The agent runs on the server, but the file tools run here:
//! - Outer step: send the prompt along with the registry's tool definitions
//! - Inner loop: while the agent stops on an approval request for one of our
//!   tools, run it locally and send the tool return back

use anyhow::{Context, Result};

use crate::client::{ClientTool, LettaClient, LettaMessage, MessageInput, ToolCallPayload, ToolReturn};
use crate::permissions::PermissionManager;
use crate::tools::{ToolCall, ToolRegistry};

/// Default maximum number of round trips in a single turn
pub const DEFAULT_MAX_STEPS: usize = 8;

/// Runs agent turns, executing client tool calls through a [`ToolRegistry`]
pub struct ToolLoop {
    client: LettaClient,
    registry: ToolRegistry,
    permissions: PermissionManager,
    max_steps: usize,
}

impl ToolLoop {
    pub fn new(client: LettaClient, registry: ToolRegistry) -> Self {
        Self {
            client,
            registry,
            permissions: PermissionManager::new(),
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    pub fn with_permissions(mut self, permissions: PermissionManager) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    fn client_tools(&self) -> Vec<ClientTool> {
        self.registry
            .definitions()
            .into_iter()
            .map(ClientTool::from)
            .collect()
    }

    /// Send a user prompt and drive the turn to completion
    ///
    /// Returns every message the server produced across all round trips.
    pub async fn run_turn(&self, agent_id: &str, prompt: &str) -> Result<Vec<LettaMessage>> {
        tracing::info!("Starting turn for agent {}", agent_id);

        let tools = self.client_tools();
        let mut input = vec![MessageInput::user(prompt)];
        let mut transcript = Vec::new();

        for step in 1..=self.max_steps {
            let response = self
                .client
                .messages()
                .create(agent_id, input, tools.clone())
                .await
                .with_context(|| format!("Failed to send message to agent {}", agent_id))?;

            let pending: Vec<ToolCallPayload> =
                response.approval_requests().into_iter().cloned().collect();
            transcript.extend(response.messages);

            if pending.is_empty() {
                tracing::info!("Turn finished after {} step(s)", step);
                return Ok(transcript);
            }
            if step == self.max_steps {
                break;
            }

            // Parallel calls are answered together, in request order
            let mut approvals = Vec::with_capacity(pending.len());
            for call in &pending {
                approvals.push(self.run_tool_call(call).await);
            }
            input = vec![MessageInput::Approval { approvals }];
        }

        tracing::warn!("Maximum tool steps ({}) reached", self.max_steps);
        Ok(transcript)
    }

    /// Run one requested tool call locally, always producing a tool return
    async fn run_tool_call(&self, call: &ToolCallPayload) -> ToolReturn {
        tracing::info!("Tool call requested: {} ({})", call.name, call.tool_call_id);

        let tool = match self.registry.get(&call.name) {
            Some(tool) => tool,
            None => {
                tracing::warn!("Agent requested unknown tool: {}", call.name);
                return ToolReturn::new(
                    &call.tool_call_id,
                    format!("Unknown tool: {}", call.name),
                    true,
                );
            }
        };

        if !self
            .permissions
            .is_allowed(&call.name, tool.requires_permission())
        {
            tracing::warn!("Permission denied for tool {}", call.name);
            return ToolReturn::new(
                &call.tool_call_id,
                format!("Permission denied for tool {}", call.name),
                true,
            );
        }

        let tool_call = ToolCall {
            id: call.tool_call_id.clone(),
            name: call.name.clone(),
            arguments: serde_json::Value::String(call.arguments.clone()),
        };

        match self.registry.execute_call(&tool_call).await {
            Ok(result) => ToolReturn::new(&call.tool_call_id, result.to_text(), result.is_error),
            Err(e) => {
                tracing::error!("Tool {} failed: {:#}", call.name, e);
                ToolReturn::new(
                    &call.tool_call_id,
                    format!("Tool execution failed: {}", e),
                    true,
                )
            }
        }
    }
}
