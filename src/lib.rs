//! Development tooling for Letta agents
//!
//! - [`tools`]: file operations exposed to agents as tools, and the registry that
//!   publishes and dispatches them
//! - [`client`]: async client for the Letta REST API
//! - [`agents`]: the coder agent recipe and the client-side tool loop
//! - [`config`]: `LETTA_*` environment configuration

pub mod agents;
pub mod cli;
pub mod client;
pub mod config;
pub mod logging;
pub mod permissions;
pub mod tools;

pub use client::{ClientError, LettaClient};
pub use config::{ConfigError, LettaConfig};
pub use tools::{FileOpError, FileOpErrorKind, Tool, ToolDefinition, ToolRegistry, ToolResult};
