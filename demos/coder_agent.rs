//! Coder agent
//!
//! Creates the coder agent, assigns it a task through its `current_task` memory
//! block and lets it work on that task with the local file tools.
//!
//! Run with: cargo run --example coder_agent "<task description>"

use anyhow::Result;
use std::env;

use letta_devtools::{
    agents::{create_coder_agent, update_coder_task, CoderAgentOptions, ToolLoop},
    cli::Console,
    LettaClient, ToolRegistry,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("coder_agent=info,letta_devtools=info")
        .init();

    let console = Console::new();
    console.print_banner("Coder Agent");

    let task = env::args()
        .nth(1)
        .unwrap_or_else(|| "List the Rust source files under ./src and summarize them.".to_string());

    let client = LettaClient::from_env()?;
    let coder = create_coder_agent(&client, CoderAgentOptions::default()).await?;
    console.print_system(&format!("Created coder agent: {} ({})", coder.name, coder.id));
    for block in &coder.memory_blocks {
        console.print_system(&format!("  [{}]", block.label));
    }

    update_coder_task(&client, &coder.id, &task).await?;
    console.print_system(&format!("Assigned task: {}", task));
    console.println();

    let tool_loop = ToolLoop::new(client.clone(), ToolRegistry::with_file_tools());
    let prompt = "Work on your current task. Report what you found when done.";
    console.print_user(prompt);
    match tool_loop.run_turn(&coder.id, prompt).await {
        Ok(messages) => console.print_messages(&messages),
        Err(e) => console.print_error(&format!("{:#}", e)),
    }
    console.println();

    if env::var("KEEP_AGENT").is_err() {
        client.agents().delete(&coder.id).await?;
        console.print_system("Deleted coder agent (set KEEP_AGENT to keep it)");
    }

    Ok(())
}
