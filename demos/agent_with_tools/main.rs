//! Agent With Tools Example
//!
//! The agent is offered the file tools as client tools. Whenever it asks to call
//! one, the tool runs here, on this machine, through the ToolLoop:
//! - read_file and list_files always run
//! - write_file is denied unless ALLOW_WRITES is set
//! - delete_file additionally needs ALLOW_DELETE
//!
//! Run with: cargo run --example agent_with_tools [directory]

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use letta_devtools::{
    agents::{
        coder::{DEFAULT_EMBEDDING, DEFAULT_MODEL},
        ToolLoop,
    },
    cli::Console,
    client::{CreateAgent, MemoryBlock},
    logging::init_logging,
    permissions::PermissionManager,
    LettaClient, ToolRegistry,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Tool activity goes to ./logs/devtools.log
    init_logging("./logs")?;

    let console = Console::new();
    console.print_banner("Letta Agent With File Tools");

    let workdir = match env::args().nth(1) {
        Some(dir) => PathBuf::from(dir),
        None => env::current_dir().context("Failed to read current directory")?,
    };
    let workdir = workdir
        .canonicalize()
        .with_context(|| format!("Invalid directory: {}", workdir.display()))?;

    // --- Step 1: Client and tools ---
    let client = LettaClient::from_env()?;
    let registry = ToolRegistry::with_file_tools();
    console.print_system(&format!("Client tools: {:?}", registry.names()));

    // --- Step 2: Permissions (writes stay denied unless listed here) ---
    let mut permissions = if env::var("ALLOW_WRITES").is_ok() {
        console.print_system("State-changing tools allowed (ALLOW_WRITES is set)");
        PermissionManager::allow_all()
    } else {
        PermissionManager::new()
    };
    // Deleting stays off unless asked for separately
    if env::var("ALLOW_DELETE").is_err() {
        permissions.always_deny_tool("delete_file");
    }

    // --- Step 3: Agent ---
    let agent = client
        .agents()
        .create(&CreateAgent {
            name: "dev_assistant".to_string(),
            model: DEFAULT_MODEL.to_string(),
            embedding: DEFAULT_EMBEDDING.to_string(),
            memory_blocks: vec![
                MemoryBlock::new(
                    "role",
                    "You are a development assistant. You can read and list files.",
                ),
                MemoryBlock::new(
                    "human",
                    format!("The developer is working in {}", workdir.display()),
                ),
            ],
            tags: vec!["dev".to_string(), "example".to_string()],
            ..Default::default()
        })
        .await?;
    console.print_system(&format!("Created agent: {}", agent.id));
    console.println();

    let tool_loop = ToolLoop::new(client.clone(), registry).with_permissions(permissions);

    let prompts = [
        "What tools do you have available?".to_string(),
        format!("List the files in {}.", workdir.display()),
        format!("Read the first 10 lines of {}/Cargo.toml.", workdir.display()),
    ];

    for prompt in &prompts {
        console.print_user(prompt);
        match tool_loop.run_turn(&agent.id, prompt).await {
            Ok(messages) => console.print_messages(&messages),
            Err(e) => console.print_error(&format!("{:#}", e)),
        }
        console.print_separator();
    }

    // Cleanup
    console.print_system("Cleaning up...");
    client.agents().delete(&agent.id).await?;
    console.print_system("Done!");

    Ok(())
}
