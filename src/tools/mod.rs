//! Tool system for agents
//!
//! This module provides the file operations, the Tool trait and the ToolRegistry
//! that publishes tool definitions and dispatches calls by name.

pub mod file_ops;
pub mod file_tools;
mod registry;
mod tool;

pub use file_ops::{delete_file, list_files, read_file, write_file, FileOpError, FileOpErrorKind};
pub use file_tools::{DeleteFileTool, ListFilesTool, ReadFileTool, WriteFileTool};
pub use registry::{ToolCall, ToolRegistry};
pub use tool::{Tool, ToolDefinition, ToolInfo, ToolInputSchema, ToolResult, ToolResultData};
