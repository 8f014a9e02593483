//! File operations exposed to agents as tools
//!
//! Four independent, stateless functions over the local filesystem:
//! - [`read_file`] - read a whole file or an inclusive 1-indexed line range
//! - [`write_file`] - write (overwrite) a file, optionally creating parent directories
//! - [`list_files`] - list regular files under a directory by glob pattern
//! - [`delete_file`] - remove a single file (never a directory)
//!
//! Every failure is reported as a [`FileOpError`] naming the offending path or argument.

use glob::{MatchOptions, Pattern};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during file operations
#[derive(Error, Debug)]
pub enum FileOpError {
    /// Target file or directory does not exist
    #[error("Not found: {0}")]
    NotFound(PathBuf),

    /// Path exists but a directory was required
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Path exists but a file was required
    #[error("Is a directory: {0}")]
    IsADirectory(PathBuf),

    /// Malformed or out-of-range argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Filesystem access control rejected the operation
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Any other filesystem failure
    #[error("I/O failure on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Error kinds as published in tool definitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileOpErrorKind {
    NotFound,
    NotADirectory,
    IsADirectory,
    InvalidArgument,
    PermissionDenied,
    #[serde(rename = "IOFailure")]
    IoFailure,
}

impl FileOpErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileOpErrorKind::NotFound => "NotFound",
            FileOpErrorKind::NotADirectory => "NotADirectory",
            FileOpErrorKind::IsADirectory => "IsADirectory",
            FileOpErrorKind::InvalidArgument => "InvalidArgument",
            FileOpErrorKind::PermissionDenied => "PermissionDenied",
            FileOpErrorKind::IoFailure => "IOFailure",
        }
    }
}

impl std::fmt::Display for FileOpErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FileOpError {
    /// The taxonomy kind of this error
    pub fn kind(&self) -> FileOpErrorKind {
        match self {
            FileOpError::NotFound(_) => FileOpErrorKind::NotFound,
            FileOpError::NotADirectory(_) => FileOpErrorKind::NotADirectory,
            FileOpError::IsADirectory(_) => FileOpErrorKind::IsADirectory,
            FileOpError::InvalidArgument(_) => FileOpErrorKind::InvalidArgument,
            FileOpError::PermissionDenied(_) => FileOpErrorKind::PermissionDenied,
            FileOpError::Io { .. } => FileOpErrorKind::IoFailure,
        }
    }

    /// Classify an `io::Error` raised while operating on `path`
    fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => FileOpError::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => FileOpError::PermissionDenied(path.to_path_buf()),
            _ => FileOpError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, FileOpError>;

/// Default pattern for [`list_files`]
pub const DEFAULT_PATTERN: &str = "*";

/// Read the contents of a file
///
/// When both `start_line` and `end_line` are given, returns lines
/// `start_line..=end_line` (1-indexed) joined with `\n`. An `end_line` past the
/// end of the file is clamped. If either bound is missing the whole file is
/// returned unmodified.
///
/// Lines end at `\n` or `\r\n`; a lone `\r` does not start a new line.
pub fn read_file(
    file_path: impl AsRef<Path>,
    start_line: Option<usize>,
    end_line: Option<usize>,
) -> Result<String> {
    let path = file_path.as_ref();
    tracing::info!("Reading file: {}", path.display());

    if !path.exists() {
        return Err(FileOpError::NotFound(path.to_path_buf()));
    }
    if path.is_dir() {
        return Err(FileOpError::IsADirectory(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|e| FileOpError::from_io(path, e))?;

    let (start, end) = match (start_line, end_line) {
        (Some(start), Some(end)) => (start, end),
        _ => return Ok(content),
    };

    let lines: Vec<&str> = content.lines().collect();

    if start < 1 || end < 1 {
        return Err(FileOpError::InvalidArgument(
            "Line numbers must be >= 1".to_string(),
        ));
    }
    if start > end {
        return Err(FileOpError::InvalidArgument(format!(
            "start_line ({}) > end_line ({})",
            start, end
        )));
    }
    if start > lines.len() {
        return Err(FileOpError::InvalidArgument(format!(
            "start_line ({}) exceeds file length ({})",
            start,
            lines.len()
        )));
    }

    let end = end.min(lines.len());
    tracing::debug!("Returning lines {}-{} of {}", start, end, lines.len());
    Ok(lines[start - 1..end].join("\n"))
}

/// Write `content` to a file, replacing any existing content
///
/// Returns a confirmation naming the number of characters written and the path.
pub fn write_file(file_path: impl AsRef<Path>, content: &str, create_dirs: bool) -> Result<String> {
    let path = file_path.as_ref();
    tracing::info!("Writing file: {}", path.display());

    if path.is_dir() {
        return Err(FileOpError::IsADirectory(path.to_path_buf()));
    }

    if create_dirs {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| FileOpError::from_io(parent, e))?;
        }
    }

    fs::write(path, content).map_err(|e| FileOpError::from_io(path, e))?;

    Ok(format!(
        "Wrote {} characters to {}",
        content.chars().count(),
        path.display()
    ))
}

/// List regular files under `directory` matching `pattern`
///
/// Without `recursive`, the pattern is matched against the whole path relative to
/// `directory` and wildcards never cross a `/`, so `*.py` only sees top-level files.
/// With `recursive`, the pattern may match any trailing run of path segments at any
/// depth, which is the `**/pattern` behavior of a shell recursive glob.
///
/// Results are `/`-separated paths relative to `directory`, sorted.
pub fn list_files(
    directory: impl AsRef<Path>,
    pattern: &str,
    recursive: bool,
) -> Result<Vec<String>> {
    let root = directory.as_ref();
    tracing::info!(
        "Listing files in {} (pattern: {}, recursive: {})",
        root.display(),
        pattern,
        recursive
    );

    if !root.exists() {
        return Err(FileOpError::NotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(FileOpError::NotADirectory(root.to_path_buf()));
    }

    let pattern_str = pattern.trim_start_matches("./");
    let compiled = Pattern::new(pattern_str).map_err(|e| {
        FileOpError::InvalidArgument(format!("Invalid glob pattern '{}': {}", pattern, e))
    })?;

    // Non-recursive patterns can only reach as deep as they have segments.
    let max_depth = if recursive || pattern_str.contains("**") {
        None
    } else {
        Some(pattern_str.split('/').count())
    };

    let mut candidates = Vec::new();
    collect_files(root, &mut Vec::new(), max_depth, &mut candidates)?;

    let mut matches: Vec<String> = candidates
        .into_iter()
        .filter(|segments| matches_segments(&compiled, segments, recursive))
        .map(|segments| segments.join("/"))
        .collect();
    matches.sort();

    tracing::debug!("Found {} files", matches.len());
    Ok(matches)
}

fn match_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    }
}

fn matches_segments(pattern: &Pattern, segments: &[String], recursive: bool) -> bool {
    let options = match_options();
    if recursive {
        (0..segments.len()).any(|skip| pattern.matches_with(&segments[skip..].join("/"), options))
    } else {
        pattern.matches_with(&segments.join("/"), options)
    }
}

/// Walk `dir`, pushing the relative segments of every regular file found
///
/// `prefix` is empty only for the root of the walk.
fn collect_files(
    dir: &Path,
    prefix: &mut Vec<String>,
    max_depth: Option<usize>,
    out: &mut Vec<Vec<String>>,
) -> Result<()> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        // Unreadable subdirectories are skipped; only the root must be readable
        Err(e) if !prefix.is_empty() && e.kind() == io::ErrorKind::PermissionDenied => {
            tracing::warn!("Skipping unreadable directory {}: {}", dir.display(), e);
            return Ok(());
        }
        Err(e) => return Err(FileOpError::from_io(dir, e)),
    };

    for entry in entries {
        let entry = entry.map_err(|e| FileOpError::from_io(dir, e))?;
        let name = entry.file_name().to_string_lossy().to_string();
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| FileOpError::from_io(&path, e))?;

        prefix.push(name);
        if path.is_file() {
            out.push(prefix.clone());
        } else if file_type.is_dir() && max_depth.map_or(true, |depth| prefix.len() < depth) {
            collect_files(&path, prefix, max_depth, out)?;
        }
        prefix.pop();
    }

    Ok(())
}

/// Delete a single file
///
/// Directories are refused with [`FileOpError::IsADirectory`] and left intact.
pub fn delete_file(file_path: impl AsRef<Path>) -> Result<String> {
    let path = file_path.as_ref();
    tracing::info!("Deleting file: {}", path.display());

    if !path.exists() {
        return Err(FileOpError::NotFound(path.to_path_buf()));
    }
    if path.is_dir() {
        return Err(FileOpError::IsADirectory(path.to_path_buf()));
    }

    fs::remove_file(path).map_err(|e| FileOpError::from_io(path, e))?;

    Ok(format!("Deleted {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::tempdir;

    fn as_set(items: Vec<String>) -> HashSet<String> {
        items.into_iter().collect()
    }

    #[test]
    fn test_write_and_read_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("test.txt");

        let result = write_file(&file, "Hello, World!", true).unwrap();
        assert!(result.contains("13 characters"));

        assert_eq!(read_file(&file, None, None).unwrap(), "Hello, World!");
    }

    #[test]
    fn test_write_counts_characters_not_bytes() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("unicode.txt");

        let result = write_file(&file, "héllo", true).unwrap();
        assert!(result.starts_with("Wrote 5 characters to "));
    }

    #[test]
    fn test_read_line_range() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("lines.txt");
        write_file(&file, "Line 1\nLine 2\nLine 3\nLine 4\nLine 5", true).unwrap();

        let result = read_file(&file, Some(2), Some(4)).unwrap();
        assert_eq!(result, "Line 2\nLine 3\nLine 4");
    }

    #[test]
    fn test_read_line_range_clamps_end() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("lines.txt");
        write_file(&file, "a\nb\nc\n", true).unwrap();

        assert_eq!(read_file(&file, Some(2), Some(99)).unwrap(), "b\nc");
    }

    #[test]
    fn test_read_crlf_lines() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("crlf.txt");
        write_file(&file, "one\r\ntwo\r\nthree", true).unwrap();

        assert_eq!(read_file(&file, Some(1), Some(2)).unwrap(), "one\ntwo");
        assert_eq!(read_file(&file, None, None).unwrap(), "one\r\ntwo\r\nthree");

        let file = dir.path().join("cr.txt");
        write_file(&file, "a\rb\nc", true).unwrap();
        assert_eq!(read_file(&file, Some(1), Some(1)).unwrap(), "a\rb");
    }

    #[test]
    fn test_single_bound_reads_whole_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("lines.txt");
        write_file(&file, "a\nb\n", true).unwrap();

        assert_eq!(read_file(&file, Some(2), None).unwrap(), "a\nb\n");
        assert_eq!(read_file(&file, None, Some(1)).unwrap(), "a\nb\n");
    }

    #[test]
    fn test_read_invalid_line_numbers() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("test.txt");
        write_file(&file, "Line 1\nLine 2", true).unwrap();

        let err = read_file(&file, Some(0), Some(1)).unwrap_err();
        assert_eq!(err.kind(), FileOpErrorKind::InvalidArgument);

        let err = read_file(&file, Some(1), Some(0)).unwrap_err();
        assert_eq!(err.kind(), FileOpErrorKind::InvalidArgument);

        let err = read_file(&file, Some(2), Some(1)).unwrap_err();
        assert_eq!(err.kind(), FileOpErrorKind::InvalidArgument);

        let err = read_file(&file, Some(3), Some(4)).unwrap_err();
        assert_eq!(err.kind(), FileOpErrorKind::InvalidArgument);
        assert!(err.to_string().contains("exceeds file length (2)"));
    }

    #[test]
    fn test_read_range_of_empty_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("empty.txt");
        write_file(&file, "", true).unwrap();

        let err = read_file(&file, Some(1), Some(1)).unwrap_err();
        assert_eq!(err.kind(), FileOpErrorKind::InvalidArgument);
    }

    #[test]
    fn test_read_missing_and_directory() {
        let dir = tempdir().unwrap();

        let err = read_file(dir.path().join("missing.txt"), None, None).unwrap_err();
        assert_eq!(err.kind(), FileOpErrorKind::NotFound);

        let err = read_file(dir.path(), None, None).unwrap_err();
        assert_eq!(err.kind(), FileOpErrorKind::IsADirectory);
    }

    #[test]
    fn test_write_overwrites() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("f.txt");
        write_file(&file, "first version", true).unwrap();
        write_file(&file, "second", true).unwrap();

        assert_eq!(fs::read_to_string(&file).unwrap(), "second");
    }

    #[test]
    fn test_write_creates_directories() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("nested").join("dir").join("file.txt");

        write_file(&file, "Test", true).unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "Test");

        // Existing ancestors are fine on a second pass
        write_file(&file, "Again", true).unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "Again");
    }

    #[test]
    fn test_write_without_create_dirs_fails_on_missing_parent() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("absent").join("file.txt");

        let err = write_file(&file, "x", false).unwrap_err();
        assert_eq!(err.kind(), FileOpErrorKind::NotFound);
        assert!(!dir.path().join("absent").exists());
    }

    #[test]
    fn test_write_to_directory_fails() {
        let dir = tempdir().unwrap();
        let err = write_file(dir.path(), "x", true).unwrap_err();
        assert_eq!(err.kind(), FileOpErrorKind::IsADirectory);
    }

    #[test]
    fn test_list_files_excludes_directories() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();
        fs::write(dir.path().join("b.py"), "").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let files = list_files(dir.path(), DEFAULT_PATTERN, false).unwrap();
        assert_eq!(files, vec!["a.txt".to_string(), "b.py".to_string()]);
    }

    #[test]
    fn test_list_files_with_pattern() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("test1.py"), "").unwrap();
        fs::write(dir.path().join("test2.py"), "").unwrap();
        fs::write(dir.path().join("readme.txt"), "").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("deep.py"), "").unwrap();

        let files = list_files(dir.path(), "*.py", false).unwrap();
        assert_eq!(
            as_set(files),
            as_set(vec!["test1.py".into(), "test2.py".into()])
        );
    }

    #[test]
    fn test_list_files_pattern_with_directory_segment() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("c.py"), "").unwrap();
        fs::write(dir.path().join("sub").join("d.txt"), "").unwrap();
        fs::write(dir.path().join("top.py"), "").unwrap();

        let files = list_files(dir.path(), "sub/*.py", false).unwrap();
        assert_eq!(files, vec!["sub/c.py".to_string()]);
    }

    #[test]
    fn test_list_files_recursive() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();
        fs::write(dir.path().join("b.py"), "").unwrap();
        fs::create_dir_all(dir.path().join("sub").join("inner")).unwrap();
        fs::write(dir.path().join("sub").join("c.txt"), "").unwrap();
        fs::write(dir.path().join("sub").join("inner").join("d.py"), "").unwrap();

        let all = list_files(dir.path(), DEFAULT_PATTERN, true).unwrap();
        assert_eq!(
            as_set(all),
            as_set(vec![
                "a.txt".into(),
                "b.py".into(),
                "sub/c.txt".into(),
                "sub/inner/d.py".into(),
            ])
        );

        let py = list_files(dir.path(), "*.py", true).unwrap();
        assert_eq!(py, vec!["b.py".to_string(), "sub/inner/d.py".to_string()]);

        let scoped = list_files(dir.path(), "inner/*.py", true).unwrap();
        assert_eq!(scoped, vec!["sub/inner/d.py".to_string()]);
    }

    #[test]
    fn test_list_files_matches_dotfiles() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".env"), "").unwrap();

        let files = list_files(dir.path(), DEFAULT_PATTERN, false).unwrap();
        assert_eq!(files, vec![".env".to_string()]);
    }

    #[test]
    fn test_list_files_errors() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "").unwrap();

        let err = list_files(dir.path().join("missing"), DEFAULT_PATTERN, false).unwrap_err();
        assert_eq!(err.kind(), FileOpErrorKind::NotFound);

        let err = list_files(&file, DEFAULT_PATTERN, false).unwrap_err();
        assert_eq!(err.kind(), FileOpErrorKind::NotADirectory);

        let err = list_files(dir.path(), "[", false).unwrap_err();
        assert_eq!(err.kind(), FileOpErrorKind::InvalidArgument);
    }

    #[cfg(unix)]
    #[test]
    fn test_list_files_recursive_skips_unreadable_subdirectory() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("hidden.txt"), "").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores mode bits, in which case the directory is simply listed
        let readable = fs::read_dir(&locked).is_ok();
        let result = list_files(dir.path(), "*", true);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let files = result.unwrap();
        if readable {
            assert_eq!(files, vec!["a.txt", "locked/hidden.txt"]);
        } else {
            assert_eq!(files, vec!["a.txt"]);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_list_files_unreadable_root_fails() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let root = dir.path().join("root");
        fs::create_dir(&root).unwrap();
        fs::set_permissions(&root, fs::Permissions::from_mode(0o000)).unwrap();

        let readable = fs::read_dir(&root).is_ok();
        let result = list_files(&root, "*", true);
        fs::set_permissions(&root, fs::Permissions::from_mode(0o755)).unwrap();

        if !readable {
            assert_eq!(result.unwrap_err().kind(), FileOpErrorKind::PermissionDenied);
        }
    }

    #[test]
    fn test_delete_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("delete_me.txt");
        fs::write(&file, "bye").unwrap();

        let result = delete_file(&file).unwrap();
        assert!(result.starts_with("Deleted"));
        assert!(!file.exists());
    }

    #[test]
    fn test_delete_refuses_directories() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("keep");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("inside.txt"), "").unwrap();

        let err = delete_file(&sub).unwrap_err();
        assert_eq!(err.kind(), FileOpErrorKind::IsADirectory);
        assert!(sub.join("inside.txt").exists());

        let err = delete_file(dir.path().join("missing.txt")).unwrap_err();
        assert_eq!(err.kind(), FileOpErrorKind::NotFound);
    }

    #[test]
    fn test_error_kind_names() {
        assert_eq!(FileOpErrorKind::IoFailure.to_string(), "IOFailure");
        assert_eq!(
            serde_json::to_string(&FileOpErrorKind::IoFailure).unwrap(),
            "\"IOFailure\""
        );
        assert_eq!(FileOpErrorKind::NotADirectory.as_str(), "NotADirectory");
    }
}
