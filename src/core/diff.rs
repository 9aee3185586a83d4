//! Staged-diff retrieval and parsing into a typed [`DiffSet`].
//!
//! Two queries feed the result: `diff --staged --numstat` supplies per-file
//! addition/deletion counts, and the full `diff --staged` text supplies
//! per-file status classification and diff bodies.
//!
//! # Public API
//! - [`FileStatus`] / [`FileChange`] / [`DiffSummary`] / [`DiffSet`]: the
//!   typed diff representation
//! - [`staged_diff`]: validated retrieval of the staged diff
//!
//! Section extraction is a line-oriented state machine keyed on exact
//! `diff --git a/X b/Y` header matches. Destination paths are recovered by
//! literal token parsing and compared with full string equality (never
//! substring containment), so a path that is a prefix of another path cannot
//! be misattributed.

use crate::core::error::{AiCommitError, Result};
use crate::core::executor::GitClient;
use crate::core::repository;
use serde::Serialize;
use std::collections::HashMap;

/// Change kind of one staged file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
}

impl FileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileStatus::Added => "added",
            FileStatus::Modified => "modified",
            FileStatus::Deleted => "deleted",
            FileStatus::Renamed => "renamed",
        }
    }
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One staged file with its change metadata and diff text.
#[derive(Debug, Clone, Serialize)]
pub struct FileChange {
    pub path: String,
    pub status: FileStatus,
    pub additions: u32,
    pub deletions: u32,
    pub diff: String,
}

/// Aggregated counts across all files of a [`DiffSet`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub additions: u32,
    pub deletions: u32,
    pub files_changed: usize,
}

/// The staged diff: per-file changes in the tool's emission order plus an
/// aggregated summary.
#[derive(Debug, Clone, Serialize)]
pub struct DiffSet {
    pub files: Vec<FileChange>,
    pub summary: DiffSummary,
}

/// Retrieve the staged diff as a typed [`DiffSet`].
///
/// State validation runs first and its failure propagates unchanged. Empty
/// numeric-stat output after validation passed signals an index race between
/// the two queries and fails with a staging error.
pub fn staged_diff(git: &GitClient) -> Result<DiffSet> {
    repository::validate_state(git)?;

    let numstat = git.run_safe(&["diff", "--staged", "--numstat"], 1)?;
    let content = git.run_safe(&["diff", "--staged"], 1)?;

    if numstat.trim().is_empty() {
        return Err(AiCommitError::staging("No staged changes found", 0, 0));
    }

    let files = parse_numstat(&numstat, &content);
    let summary = summarize(&files);

    Ok(DiffSet { files, summary })
}

/// Parse `diff --numstat` output, joining each entry with its diff section.
///
/// Lines with fewer than 3 tab-separated fields are skipped. The binary-file
/// sentinel `-` and unparsable counts both map to 0.
pub fn parse_numstat(numstat: &str, diff_content: &str) -> Vec<FileChange> {
    let mut sections = split_file_sections(diff_content);
    let mut files = Vec::new();

    for line in numstat.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() < 3 {
            continue;
        }

        let additions = parse_count(parts[0]);
        let deletions = parse_count(parts[1]);
        let path = parts[2].to_string();

        let diff = sections.remove(path.as_str()).unwrap_or_default();
        let status = classify_section(&diff);

        files.push(FileChange {
            path,
            status,
            additions,
            deletions,
            diff,
        });
    }

    files
}

fn parse_count(field: &str) -> u32 {
    if field == "-" {
        return 0;
    }
    field.parse().unwrap_or(0)
}

/// Extract the destination path from a `diff --git a/X b/Y` header line.
///
/// Literal token parsing: strip the fixed prefix, then split at the ` b/`
/// separator. No patterns are involved, so metacharacters in paths are
/// harmless.
fn parse_header_dest(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("diff --git a/")?;
    let sep = rest.find(" b/")?;
    Some(&rest[sep + 3..])
}

/// Split the full diff text into per-file sections keyed by destination path.
///
/// A section opens at each `diff --git` header and runs until the next header
/// or end of input. Header lines are included in their section.
fn split_file_sections(diff_content: &str) -> HashMap<String, String> {
    let mut sections = HashMap::new();
    let mut current_path: Option<String> = None;
    let mut current_lines: Vec<&str> = Vec::new();

    for line in diff_content.lines() {
        if line.starts_with("diff --git ") {
            if let Some(path) = current_path.take() {
                sections.insert(path, current_lines.join("\n"));
            }
            current_lines.clear();
            current_path = parse_header_dest(line).map(str::to_string);
            if current_path.is_some() {
                current_lines.push(line);
            }
        } else if current_path.is_some() {
            current_lines.push(line);
        }
    }
    if let Some(path) = current_path {
        sections.insert(path, current_lines.join("\n"));
    }

    sections
}

/// Classify a file from markers inside its OWN diff section only.
fn classify_section(section: &str) -> FileStatus {
    for line in section.lines() {
        if line.starts_with("new file mode") {
            return FileStatus::Added;
        }
        if line.starts_with("deleted file mode") {
            return FileStatus::Deleted;
        }
        if line.starts_with("rename from") {
            return FileStatus::Renamed;
        }
    }
    FileStatus::Modified
}

fn summarize(files: &[FileChange]) -> DiffSummary {
    DiffSummary {
        additions: files.iter().map(|f| f.additions).sum(),
        deletions: files.iter().map(|f| f.deletions).sum(),
        files_changed: files.len(),
    }
}
