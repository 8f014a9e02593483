//! Development agents built on the Letta client

pub mod coder;
pub mod runner;

pub use coder::{create_coder_agent, update_coder_task, CoderAgent, CoderAgentOptions};
pub use runner::ToolLoop;
