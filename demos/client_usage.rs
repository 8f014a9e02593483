//! Letta client usage
//!
//! Walks through the common client operations against a live server:
//! agent lifecycle, server-side tools, core and archival memory, conversation.
//!
//! Run with: cargo run --example client_usage

use anyhow::Result;

use letta_devtools::{
    agents::coder::{DEFAULT_EMBEDDING, DEFAULT_MODEL},
    cli::Console,
    client::{CreateAgent, CreatePassage, MemoryBlock, MessageInput, ToolCreate, UpdateAgent},
    LettaClient,
};

const EXAMPLE_TOOL_SOURCE: &str = r#"def example_tool(param: str) -> str:
    """Example tool function.

    Args:
        param: Any text

    Returns:
        The received text
    """
    return f"Received: {param}"
"#;

fn agent_request(name: &str, blocks: Vec<MemoryBlock>) -> CreateAgent {
    CreateAgent {
        name: name.to_string(),
        model: DEFAULT_MODEL.to_string(),
        embedding: DEFAULT_EMBEDDING.to_string(),
        memory_blocks: blocks,
        tags: vec!["demo".to_string()],
        ..Default::default()
    }
}

async fn demo_agent_lifecycle(client: &LettaClient, console: &Console) -> Result<()> {
    console.print_banner("Agent Lifecycle");

    let agent = client
        .agents()
        .create(&agent_request(
            "lifecycle_demo",
            vec![MemoryBlock::new("human", "User is a developer")],
        ))
        .await?;
    console.print_system(&format!("Created: {}", agent.id));

    let retrieved = client.agents().retrieve(&agent.id).await?;
    console.print_system(&format!("Name: {}, tags: {:?}", retrieved.name, retrieved.tags));

    let updated = client
        .agents()
        .update(
            &agent.id,
            &UpdateAgent {
                name: Some("updated_demo".to_string()),
                tags: Some(vec!["demo".to_string(), "updated".to_string()]),
                ..Default::default()
            },
        )
        .await?;
    console.print_system(&format!("New name: {}, new tags: {:?}", updated.name, updated.tags));

    client.agents().delete(&agent.id).await?;
    console.print_system("Deleted!");
    console.println();
    Ok(())
}

async fn demo_tool_management(client: &LettaClient, console: &Console) -> Result<()> {
    console.print_banner("Tool Management");

    let tool = client
        .tools()
        .upsert(&ToolCreate {
            source_code: EXAMPLE_TOOL_SOURCE.to_string(),
            tags: vec!["demo".to_string()],
            ..Default::default()
        })
        .await?;
    console.print_system(&format!("Created: {} ({})", tool.name, tool.id));

    for t in client.tools().list(&["demo".to_string()]).await? {
        console.print_system(&format!("  - {}", t.name));
    }

    let mut request = agent_request("tool_demo", vec![MemoryBlock::new("human", "Demo user")]);
    request.tool_ids = vec![tool.id.clone()];
    let agent = client.agents().create(&request).await?;
    console.print_system(&format!(
        "Agent {} has {} tool(s)",
        agent.name,
        agent.tool_ids().len()
    ));

    client.agents().delete(&agent.id).await?;
    client.tools().delete(&tool.id).await?;
    console.print_system("Cleaned up!");
    console.println();
    Ok(())
}

async fn demo_memory_operations(client: &LettaClient, console: &Console) -> Result<()> {
    console.print_banner("Memory Operations");

    let agent = client
        .agents()
        .create(&agent_request(
            "memory_demo",
            vec![
                MemoryBlock::new("human", "User: Alex"),
                MemoryBlock::new("persona", "I am helpful"),
            ],
        ))
        .await?;

    console.print_system("Core memory blocks:");
    for block in &agent.memory.blocks {
        console.print_system(&format!("  {}: {}", block.label, block.value));
    }

    let passages = [
        ("Alex prefers Rust over JavaScript", vec!["preferences"]),
        ("Alex uses cargo test for testing", vec!["preferences", "testing"]),
    ];
    for (text, tags) in passages {
        client
            .passages()
            .create(
                &agent.id,
                &CreatePassage {
                    text: text.to_string(),
                    tags: tags.into_iter().map(str::to_string).collect(),
                },
            )
            .await?;
    }
    console.print_system("Inserted 2 passages");

    let found = client.passages().search(&agent.id, "Rust", 5).await?;
    console.print_system(&format!("Search for 'Rust' returned {} result(s):", found.count));
    for result in &found.results {
        console.print_system(&format!("  - {}", result.content));
    }

    for passage in client.passages().list(&agent.id).await? {
        console.print_system(&format!("  - {} (tags: {:?})", passage.text, passage.tags));
    }

    let block = client
        .agents()
        .modify_block(&agent.id, "human", "User: Alex (updated)")
        .await?;
    console.print_system(&format!("Updated core memory: {}: {}", block.label, block.value));

    client.agents().delete(&agent.id).await?;
    console.print_system("Cleaned up!");
    console.println();
    Ok(())
}

async fn demo_conversation(client: &LettaClient, console: &Console) -> Result<()> {
    console.print_banner("Conversation");

    let agent = client
        .agents()
        .create(&agent_request(
            "chat_demo",
            vec![
                MemoryBlock::new("human", "User is learning Letta"),
                MemoryBlock::new("persona", "I am a patient teacher"),
            ],
        ))
        .await?;

    for prompt in ["Hello!", "What is Letta?", "Thanks!"] {
        console.print_user(prompt);
        let response = client
            .messages()
            .create(&agent.id, vec![MessageInput::user(prompt)], vec![])
            .await?;
        console.print_messages(&response.messages);
        console.println();
    }

    client.agents().delete(&agent.id).await?;
    console.print_system("Cleaned up!");
    console.println();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("client_usage=info,letta_devtools=warn")
        .init();

    let console = Console::new();
    let client = LettaClient::from_env()?;

    demo_agent_lifecycle(&client, &console).await?;
    demo_tool_management(&client, &console).await?;
    demo_memory_operations(&client, &console).await?;
    demo_conversation(&client, &console).await?;

    console.print_system("All demos complete!");
    Ok(())
}
