//! Minimal Agent Example
//!
//! Creates an agent with two memory blocks, holds a short conversation and
//! deletes the agent again.
//!
//! Requires a running Letta server (LETTA_BASE_URL, default http://localhost:8283).
//!
//! Run with: cargo run --example minimal_agent

use anyhow::Result;

use letta_devtools::{
    agents::coder::{DEFAULT_EMBEDDING, DEFAULT_MODEL},
    cli::Console,
    client::{CreateAgent, MemoryBlock, MessageInput},
    LettaClient,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("minimal_agent=info,letta_devtools=warn")
        .init();

    let console = Console::new();
    console.print_banner("Minimal Letta Agent");

    let client = LettaClient::from_env()?;
    console.print_system(&format!("Connected to {}", client.config().base_url));

    let agent = client
        .agents()
        .create(&CreateAgent {
            name: "minimal_agent".to_string(),
            model: DEFAULT_MODEL.to_string(),
            embedding: DEFAULT_EMBEDDING.to_string(),
            memory_blocks: vec![
                MemoryBlock::new("human", "The user's name is Alex."),
                MemoryBlock::new("persona", "I am a helpful assistant."),
            ],
            tags: vec!["example".to_string(), "minimal".to_string()],
            ..Default::default()
        })
        .await?;

    console.print_system(&format!("Created agent: {}", agent.id));
    console.print_system(&format!("Name: {}", agent.name));
    console.print_system(&format!("Model: {}", agent.model_name().unwrap_or("unknown")));
    console.println();

    let prompts = [
        "Hello! What's my name?",
        "What can you help me with?",
        "Thank you!",
    ];

    for prompt in prompts {
        console.print_user(prompt);
        let response = client
            .messages()
            .create(&agent.id, vec![MessageInput::user(prompt)], vec![])
            .await?;
        console.print_agent(&response.assistant_text());
        console.println();
    }

    console.print_system(&format!("Deleting agent {}...", agent.id));
    client.agents().delete(&agent.id).await?;
    console.print_system("Done!");

    Ok(())
}
