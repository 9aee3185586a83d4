//! Commit execution: message validation, single-line and subject+body
//! commits, and summary-line parsing.
//!
//! # Public API
//! - [`validate_message`]: shape checks plus advisory conventional-format
//!   warnings returned as data
//! - [`commit`] / [`commit_with_body`]: validated commits via the retriable
//!   executor
//! - [`CommitResult`]: parsed hash and change counts; parse misses degrade to
//!   defaults, never to failures
//! - [`last_commit`]: most recent commit metadata
//!
//! Multi-line messages go through a uniquely named temp file committed with
//! `-F`. The file is removed on every exit path by a drop guard; a cleanup
//! failure is logged, never escalated.

use crate::core::error::{AiCommitError, Result};
use crate::core::executor::GitClient;
use crate::core::repository;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Conventional commit types accepted without a warning.
const CONVENTIONAL_TYPES: &[&str] = &[
    "feat", "fix", "docs", "style", "refactor", "perf", "test", "build", "ci", "chore", "revert",
];

const MIN_MESSAGE_LEN: usize = 10;
const MAX_FIRST_LINE_LEN: usize = 100;

/// Parsed outcome of a successful commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitResult {
    /// Short hash from git's bracketed summary, or "unknown" on parse miss
    pub hash: String,
    pub files_changed: u32,
    pub insertions: u32,
    pub deletions: u32,
}

/// Metadata of the most recent commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitInfo {
    pub hash: String,
    pub subject: String,
    pub author: String,
    pub date: String,
}

/// Validate commit message shape.
///
/// Hard failures: empty/whitespace-only message, trimmed length under 10
/// characters, first line over 100 characters. Conventional-format compliance
/// is advisory: a mismatch yields warning strings in the returned Vec so
/// callers (and tests) can surface them, but never fails validation.
pub fn validate_message(message: &str) -> Result<Vec<String>> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return Err(AiCommitError::commit("Commit message cannot be empty", None));
    }

    if trimmed.len() < MIN_MESSAGE_LEN {
        return Err(AiCommitError::commit(
            format!(
                "Commit message is too short (minimum {} characters)",
                MIN_MESSAGE_LEN
            ),
            None,
        ));
    }

    let first_line = trimmed.lines().next().unwrap_or_default();
    if first_line.len() > MAX_FIRST_LINE_LEN {
        return Err(AiCommitError::commit(
            format!(
                "Commit message first line is too long (maximum {} characters)",
                MAX_FIRST_LINE_LEN
            ),
            None,
        ));
    }

    let mut warnings = Vec::new();
    if !is_conventional(first_line) {
        warnings.push("Commit message does not follow conventional commit format".to_string());
        warnings.push("Recommended format: type(scope): description".to_string());
        warnings.push("Example: feat(auth): add user authentication".to_string());
    }

    Ok(warnings)
}

/// Check `type(scope): description` shape against the fixed type set.
/// Literal parsing; no patterns.
pub fn is_conventional(first_line: &str) -> bool {
    let Some((prefix, description)) = first_line.split_once(": ") else {
        return false;
    };
    if description.is_empty() {
        return false;
    }

    let commit_type = match prefix.split_once('(') {
        Some((ty, rest)) => {
            // A scope must be non-empty and close the parenthesis
            let Some(scope) = rest.strip_suffix(')') else {
                return false;
            };
            if scope.is_empty() {
                return false;
            }
            ty
        }
        None => prefix,
    };

    CONVENTIONAL_TYPES.contains(&commit_type)
}

/// Commit staged changes with a single-line message.
///
/// Validates repository state, then the message (warnings are logged), then
/// runs `commit -m` with a 2-attempt budget for lock contention.
pub fn commit(git: &GitClient, message: &str) -> Result<CommitResult> {
    repository::validate_state(git)?;

    for warning in validate_message(message)? {
        log::warn!("{}", warning);
    }

    let output = run_commit(git, &["commit", "-m", message])?;
    Ok(parse_commit_output(&output))
}

/// Commit staged changes with a subject and optional body.
///
/// The combined message (subject, blank line, body) is validated and written
/// to a uniquely named temp file committed via `commit -F`. The drop guard
/// removes the file on every exit path.
pub fn commit_with_body(git: &GitClient, subject: &str, body: Option<&str>) -> Result<CommitResult> {
    repository::validate_state(git)?;

    let full_message = match body {
        Some(body) => format!("{}\n\n{}", subject, body),
        None => subject.to_string(),
    };

    for warning in validate_message(&full_message)? {
        log::warn!("{}", warning);
    }

    let temp_file = TempMessageFile::create(&full_message)?;
    let path = temp_file.path().to_string_lossy().to_string();

    let output = run_commit(git, &["commit", "-F", &path])?;
    Ok(parse_commit_output(&output))
}

/// Metadata of the last commit, pipe-delimited from `git log -1`.
pub fn last_commit(git: &GitClient) -> Result<CommitInfo> {
    let output = git.run_safe(
        &["log", "-1", "--pretty=format:%H|%s|%an|%ad", "--date=short"],
        1,
    )?;

    let parts: Vec<&str> = output.trim().splitn(4, '|').collect();
    if parts.len() < 4 {
        return Err(AiCommitError::commit(
            "Unable to parse last commit information",
            Some(output),
        ));
    }

    Ok(CommitInfo {
        hash: parts[0].to_string(),
        subject: parts[1].to_string(),
        author: parts[2].to_string(),
        date: parts[3].to_string(),
    })
}

/// Run the commit subcommand, upgrading command failures to commit failures
/// so their remedies (identity, nothing-to-commit, pathspec) apply.
fn run_commit(git: &GitClient, args: &[&str]) -> Result<String> {
    git.run_safe(args, 2).map_err(|err| match err {
        AiCommitError::Command { original_error, .. } => {
            AiCommitError::commit("Failed to commit changes", Some(original_error))
        }
        other => other,
    })
}

/// Parse git's commit stdout into a [`CommitResult`].
///
/// The bracketed short hash and the "N file(s) changed, M insertion(s), K
/// deletion(s)" line are each optional; every miss degrades to its default.
pub fn parse_commit_output(output: &str) -> CommitResult {
    let mut result = CommitResult {
        hash: parse_commit_hash(output),
        files_changed: 0,
        insertions: 0,
        deletions: 0,
    };

    for line in output.lines() {
        let line = line.trim();
        if !line.contains("changed") {
            continue;
        }

        for part in line.split(',') {
            let part = part.trim();
            let count: u32 = part
                .split_whitespace()
                .next()
                .and_then(|n| n.parse().ok())
                .unwrap_or(0);

            if part.contains("file") {
                result.files_changed = count;
            } else if part.contains("insertion") {
                result.insertions = count;
            } else if part.contains("deletion") {
                result.deletions = count;
            }
        }

        if result.files_changed > 0 {
            break;
        }
    }

    result
}

/// Extract the short hash from a summary line like `[main 1a2b3c4] subject`.
fn parse_commit_hash(output: &str) -> String {
    for line in output.lines() {
        let Some(start) = line.find('[') else { continue };
        let Some(len) = line[start..].find(']') else { continue };
        let inside = &line[start + 1..start + len];

        if let Some(token) = inside.split_whitespace().last() {
            if token.len() >= 7 && token.chars().all(|c| c.is_ascii_hexdigit()) {
                return token.to_string();
            }
        }
    }
    "unknown".to_string()
}

/// Commit-message temp file removed on drop, success or failure.
struct TempMessageFile {
    path: PathBuf,
}

impl TempMessageFile {
    fn create(content: &str) -> Result<Self> {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let path = std::env::temp_dir().join(format!(
            "ai-commit-message-{}-{}.txt",
            std::process::id(),
            millis
        ));
        fs::write(&path, content)?;
        Ok(Self { path })
    }

    fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Drop for TempMessageFile {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_file(&self.path) {
            log::warn!(
                "could not clean up temporary file {}: {}",
                self.path.display(),
                err
            );
        }
    }
}
