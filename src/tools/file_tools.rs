//! Agent-facing wrappers around the file operations
//!
//! Each operation in [`super::file_ops`] gets its own tool so that an agent sees
//! `read_file`, `write_file`, `list_files` and `delete_file` as separate functions
//! with their own typed parameters.

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

use super::file_ops::{self, FileOpError, FileOpErrorKind};
use super::tool::{Tool, ToolDefinition, ToolInfo, ToolInputSchema, ToolResult};

/// Resolve a path against an optional base directory (absolute paths pass through)
fn resolve_path(base_dir: &Option<PathBuf>, path: &str) -> PathBuf {
    let path = Path::new(path);
    match base_dir {
        Some(base) if !path.is_absolute() => base.join(path),
        _ => path.to_path_buf(),
    }
}

fn error_names(kinds: &[FileOpErrorKind]) -> Vec<String> {
    kinds.iter().map(|k| k.as_str().to_string()).collect()
}

fn failure(err: FileOpError) -> ToolResult {
    tracing::warn!("File operation failed: {}", err);
    ToolResult::error(err.to_string()).with_error_kind(err.kind().as_str())
}

fn parse_input<T: for<'de> Deserialize<'de>>(tool: &str, input: &Value) -> Result<T> {
    serde_json::from_value(input.clone())
        .map_err(|e| anyhow::anyhow!("Invalid {} input: {}", tool, e))
}

fn path_info(tool: &str, verb: &str, input: &Value, key: &str) -> ToolInfo {
    let path = input.get(key).and_then(|v| v.as_str()).unwrap_or("?");
    ToolInfo {
        name: tool.to_string(),
        action_description: format!("{}: {}", verb, path),
        details: None,
    }
}

// ---------------------------------------------------------------------------
// read_file
// ---------------------------------------------------------------------------

/// Read a file, optionally a 1-indexed inclusive line range
#[derive(Debug, Default, Clone)]
pub struct ReadFileTool {
    base_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct ReadInput {
    file_path: String,
    #[serde(default)]
    start_line: Option<i64>,
    #[serde(default)]
    end_line: Option<i64>,
}

/// Agents may send any integer; values below 1 map to 0 so that
/// [`file_ops::read_file`] rejects them as `InvalidArgument`
fn line_bound(value: Option<i64>) -> Option<usize> {
    value.map(|v| usize::try_from(v.max(0)).unwrap_or(usize::MAX))
}

impl ReadFileTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `base_dir`
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }
}

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read contents of a file. If both start_line and end_line are given, only that inclusive, 1-indexed line range is returned."
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: ToolInputSchema::object(
                json!({
                    "file_path": {
                        "type": "string",
                        "description": "Absolute path to the file"
                    },
                    "start_line": {
                        "type": "integer",
                        "minimum": 1,
                        "description": "Optional starting line (1-indexed)"
                    },
                    "end_line": {
                        "type": "integer",
                        "minimum": 1,
                        "description": "Optional ending line (inclusive, 1-indexed)"
                    }
                }),
                &["file_path"],
            ),
            returns: json!({"type": "string", "description": "File contents"}),
            errors: error_names(&[
                FileOpErrorKind::NotFound,
                FileOpErrorKind::IsADirectory,
                FileOpErrorKind::InvalidArgument,
                FileOpErrorKind::PermissionDenied,
                FileOpErrorKind::IoFailure,
            ]),
        }
    }

    fn get_info(&self, input: &Value) -> ToolInfo {
        path_info(self.name(), "Read file", input, "file_path")
    }

    async fn execute(&self, input: &Value) -> Result<ToolResult> {
        let input: ReadInput = parse_input(self.name(), input)?;
        let path = resolve_path(&self.base_dir, &input.file_path);

        let start = line_bound(input.start_line);
        let end = line_bound(input.end_line);

        Ok(match file_ops::read_file(&path, start, end) {
            Ok(content) => ToolResult::success(content),
            Err(e) => failure(e),
        })
    }

    fn requires_permission(&self) -> bool {
        false // Read-only operation
    }
}

// ---------------------------------------------------------------------------
// write_file
// ---------------------------------------------------------------------------

/// Write content to a file, creating parent directories by default
#[derive(Debug, Default, Clone)]
pub struct WriteFileTool {
    base_dir: Option<PathBuf>,
}

fn default_create_dirs() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct WriteInput {
    file_path: String,
    content: String,
    #[serde(default = "default_create_dirs")]
    create_dirs: bool,
}

impl WriteFileTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }
}

#[async_trait]
impl Tool for WriteFileTool {
    fn name(&self) -> &str {
        "write_file"
    }

    fn description(&self) -> &str {
        "Write content to a file, replacing it if it exists. Parent directories are created unless create_dirs is false."
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: ToolInputSchema::object(
                json!({
                    "file_path": {
                        "type": "string",
                        "description": "Absolute path to file"
                    },
                    "content": {
                        "type": "string",
                        "description": "Content to write"
                    },
                    "create_dirs": {
                        "type": "boolean",
                        "default": true,
                        "description": "Create parent directories if they don't exist"
                    }
                }),
                &["file_path", "content"],
            ),
            returns: json!({
                "type": "string",
                "description": "Confirmation with character count and file path"
            }),
            errors: error_names(&[
                FileOpErrorKind::NotFound,
                FileOpErrorKind::IsADirectory,
                FileOpErrorKind::PermissionDenied,
                FileOpErrorKind::IoFailure,
            ]),
        }
    }

    fn get_info(&self, input: &Value) -> ToolInfo {
        let mut info = path_info(self.name(), "Write file", input, "file_path");
        info.details = input
            .get("content")
            .and_then(|v| v.as_str())
            .map(|c| format!("{} characters", c.chars().count()));
        info
    }

    async fn execute(&self, input: &Value) -> Result<ToolResult> {
        let input: WriteInput = parse_input(self.name(), input)?;
        let path = resolve_path(&self.base_dir, &input.file_path);

        Ok(
            match file_ops::write_file(&path, &input.content, input.create_dirs) {
                Ok(message) => ToolResult::success(message),
                Err(e) => failure(e),
            },
        )
    }
}

// ---------------------------------------------------------------------------
// list_files
// ---------------------------------------------------------------------------

/// List files in a directory by glob pattern
#[derive(Debug, Default, Clone)]
pub struct ListFilesTool {
    base_dir: Option<PathBuf>,
}

fn default_pattern() -> String {
    file_ops::DEFAULT_PATTERN.to_string()
}

#[derive(Debug, Deserialize)]
struct ListInput {
    directory: String,
    #[serde(default = "default_pattern")]
    pattern: String,
    #[serde(default)]
    recursive: bool,
}

impl ListFilesTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }
}

#[async_trait]
impl Tool for ListFilesTool {
    fn name(&self) -> &str {
        "list_files"
    }

    fn description(&self) -> &str {
        "List files (not directories) in a directory, as paths relative to it. Supports glob patterns such as '*.rs' and recursive search."
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: ToolInputSchema::object(
                json!({
                    "directory": {
                        "type": "string",
                        "description": "Path to directory"
                    },
                    "pattern": {
                        "type": "string",
                        "default": file_ops::DEFAULT_PATTERN,
                        "description": "Glob pattern (e.g., '*.py', 'test_*')"
                    },
                    "recursive": {
                        "type": "boolean",
                        "default": false,
                        "description": "Search recursively if true"
                    }
                }),
                &["directory"],
            ),
            returns: json!({
                "type": "array",
                "items": {"type": "string"},
                "description": "File paths relative to the directory"
            }),
            errors: error_names(&[
                FileOpErrorKind::NotFound,
                FileOpErrorKind::NotADirectory,
                FileOpErrorKind::InvalidArgument,
                FileOpErrorKind::PermissionDenied,
                FileOpErrorKind::IoFailure,
            ]),
        }
    }

    fn get_info(&self, input: &Value) -> ToolInfo {
        let mut info = path_info(self.name(), "List files", input, "directory");
        let pattern = input
            .get("pattern")
            .and_then(|v| v.as_str())
            .unwrap_or(file_ops::DEFAULT_PATTERN);
        let recursive = input
            .get("recursive")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        info.details = Some(format!("Pattern: {}, recursive: {}", pattern, recursive));
        info
    }

    async fn execute(&self, input: &Value) -> Result<ToolResult> {
        let input: ListInput = parse_input(self.name(), input)?;
        let path = resolve_path(&self.base_dir, &input.directory);

        Ok(
            match file_ops::list_files(&path, &input.pattern, input.recursive) {
                Ok(files) => ToolResult::list(files),
                Err(e) => failure(e),
            },
        )
    }

    fn requires_permission(&self) -> bool {
        false
    }
}

// ---------------------------------------------------------------------------
// delete_file
// ---------------------------------------------------------------------------

/// Delete a single file
#[derive(Debug, Default, Clone)]
pub struct DeleteFileTool {
    base_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct DeleteInput {
    file_path: String,
}

impl DeleteFileTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }
}

#[async_trait]
impl Tool for DeleteFileTool {
    fn name(&self) -> &str {
        "delete_file"
    }

    fn description(&self) -> &str {
        "Delete a file. Directories are never deleted."
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: ToolInputSchema::object(
                json!({
                    "file_path": {
                        "type": "string",
                        "description": "Path to file to delete"
                    }
                }),
                &["file_path"],
            ),
            returns: json!({"type": "string", "description": "Success message"}),
            errors: error_names(&[
                FileOpErrorKind::NotFound,
                FileOpErrorKind::IsADirectory,
                FileOpErrorKind::PermissionDenied,
                FileOpErrorKind::IoFailure,
            ]),
        }
    }

    fn get_info(&self, input: &Value) -> ToolInfo {
        path_info(self.name(), "Delete file", input, "file_path")
    }

    async fn execute(&self, input: &Value) -> Result<ToolResult> {
        let input: DeleteInput = parse_input(self.name(), input)?;
        let path = resolve_path(&self.base_dir, &input.file_path);

        Ok(match file_ops::delete_file(&path) {
            Ok(message) => ToolResult::success(message),
            Err(e) => failure(e),
        })
    }
}
