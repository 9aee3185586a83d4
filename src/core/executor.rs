//! Low-level git subprocess execution with failure classification and retry.
//!
//! [`GitClient`] is the single entry point to the external `git` binary. It
//! captures stdout/stderr separately, classifies non-zero exits into the
//! domain error taxonomy, and offers a bounded-retry wrapper for failures
//! classified as transient (index lock contention).
//!
//! # Public API
//! - [`GitClient`]: subprocess runner bound to an optional working directory
//! - [`GitClient::run`]: single invocation with failure classification
//! - [`GitClient::run_safe`]: bounded retry with fixed backoff

use crate::core::error::{AiCommitError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

/// Fixed sleep between retry attempts.
const RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// Runs git subcommands, optionally pinned to a working directory.
///
/// Binding the working directory (instead of relying on the process CWD)
/// keeps operations deterministic when several repositories are involved,
/// and lets tests target temporary repositories.
#[derive(Debug, Clone, Default)]
pub struct GitClient {
    workdir: Option<PathBuf>,
}

impl GitClient {
    /// Client operating in the current working directory
    pub fn new() -> Self {
        Self { workdir: None }
    }

    /// Client pinned to the given directory
    pub fn in_dir<P: AsRef<Path>>(path: P) -> Self {
        Self {
            workdir: Some(path.as_ref().to_path_buf()),
        }
    }

    /// Execute a git subcommand, capturing stdout as UTF-8 text.
    ///
    /// Non-zero exits are classified: a "not a git repository" marker in
    /// stderr yields [`AiCommitError::Repository`], anything else a
    /// [`AiCommitError::Command`] carrying the joined command string, the
    /// stderr text, and the exit code. A spawn failure (git not installed)
    /// is wrapped into the same `Command` variant rather than leaking a raw
    /// IO error.
    pub fn run(&self, args: &[&str]) -> Result<String> {
        let mut cmd = Command::new("git");
        cmd.args(args);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }

        let command_line = args.join(" ");
        let output = cmd
            .output()
            .map_err(|e| AiCommitError::command(&command_line, e.to_string(), None))?;

        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).to_string());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if stderr.contains("not a git repository") {
            return Err(AiCommitError::repository("Not in a git repository"));
        }

        Err(AiCommitError::command(
            command_line,
            stderr,
            output.status.code(),
        ))
    }

    /// Execute a git subcommand with bounded retry for transient failures.
    ///
    /// `retries` is the total attempt budget. A retry happens only when the
    /// failure is transient (index lock contention) and attempts remain;
    /// repository and staging failures are never retried. A fixed 1-second
    /// backoff separates attempts. Exhausting the budget surfaces the last
    /// failure.
    pub fn run_safe(&self, args: &[&str], retries: u32) -> Result<String> {
        let attempts = retries.max(1);
        let mut attempt = 1;

        loop {
            match self.run(args) {
                Ok(output) => return Ok(output),
                Err(err) => {
                    if !err.is_transient() || attempt >= attempts {
                        return Err(err);
                    }
                    log::warn!(
                        "git operation failed (attempt {}/{}), retrying: {}",
                        attempt,
                        attempts,
                        err
                    );
                    std::thread::sleep(RETRY_BACKOFF);
                    attempt += 1;
                }
            }
        }
    }
}
