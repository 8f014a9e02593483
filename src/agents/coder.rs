//! Coder development agent
//!
//! Creates the agent that implements features from specs, seeded with its role,
//! current task and coding standards as core memory blocks.

use serde::Serialize;

use crate::client::{ClientResult, CreateAgent, LettaClient, MemoryBlock};

pub const CURRENT_TASK_LABEL: &str = "current_task";
pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";
pub const DEFAULT_EMBEDDING: &str = "openai/text-embedding-3-small";

const UNASSIGNED_TASK: &str = "No task assigned. Awaiting assignment from Orchestrator.";

const ROLE: &str = "You are the Coder agent. Write clean, maintainable code following \
project coding standards.\n\n\
Responsibilities:\n\
- Implement features as specified in feature specs\n\
- Follow coding standards: clarity > robustness > speed > cleverness\n\
- Write conventional commit messages (feat/fix/refactor)\n\
- Request context via Documentation Specialist when needed\n\
- Coordinate with Tester for testability\n\
- Work in bite-sized increments\n\
- Update decision logs immediately";

const CODING_STANDARDS: &str = "Rust project:\n\
- Public items documented; modules start with a //! summary\n\
- Errors propagate with Result and ?; no unwrap() outside tests\n\
- Functions <80 lines, modules <500 lines (unless justified)\n\
- Clarity principle: clarity > robustness > speed > cleverness\n\
- cargo fmt and cargo clippy clean before commit\n\
- Conventional commits: feat(module), fix(module), refactor(module)";

/// Options for [`create_coder_agent`]
#[derive(Debug, Clone)]
pub struct CoderAgentOptions {
    pub name: String,
    pub model: String,
    pub embedding: String,
    /// Server-side tools to attach
    pub tool_ids: Vec<String>,
}

impl Default for CoderAgentOptions {
    fn default() -> Self {
        Self {
            name: "coder".to_string(),
            model: DEFAULT_MODEL.to_string(),
            embedding: DEFAULT_EMBEDDING.to_string(),
            tool_ids: Vec::new(),
        }
    }
}

/// Summary of a created coder agent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoderAgent {
    pub id: String,
    pub name: String,
    pub model: Option<String>,
    pub memory_blocks: Vec<MemoryBlock>,
    pub tool_ids: Vec<String>,
    pub tags: Vec<String>,
}

/// Memory blocks a new coder agent starts with
pub fn coder_memory_blocks() -> Vec<MemoryBlock> {
    vec![
        MemoryBlock::new("role", ROLE),
        MemoryBlock::new(CURRENT_TASK_LABEL, UNASSIGNED_TASK),
        MemoryBlock::new("coding_standards", CODING_STANDARDS),
    ]
}

/// Create a coder agent on the server
pub async fn create_coder_agent(
    client: &LettaClient,
    options: CoderAgentOptions,
) -> ClientResult<CoderAgent> {
    let request = CreateAgent {
        name: options.name,
        model: options.model,
        embedding: options.embedding,
        memory_blocks: coder_memory_blocks(),
        tool_ids: options.tool_ids,
        tags: vec!["dev".to_string(), "coder".to_string()],
    };

    let agent = client.agents().create(&request).await?;
    tracing::info!("Created coder agent {} ({})", agent.name, agent.id);

    Ok(CoderAgent {
        model: agent.model_name().map(str::to_string),
        tool_ids: agent.tool_ids(),
        id: agent.id,
        name: agent.name,
        memory_blocks: agent.memory.blocks,
        tags: agent.tags,
    })
}

/// Replace the coder agent's `current_task` memory block
pub async fn update_coder_task(
    client: &LettaClient,
    agent_id: &str,
    task_description: &str,
) -> ClientResult<()> {
    client
        .agents()
        .modify_block(agent_id, CURRENT_TASK_LABEL, task_description)
        .await?;
    Ok(())
}
