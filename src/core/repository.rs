//! Repository-state validation: the precondition gate for every diff and
//! commit operation.
//!
//! # Public API
//! - [`is_repository`]: fail-safe-false repository probe
//! - [`has_staged_changes`]: staged-index probe, repository failures propagate
//! - [`validate_state`]: composed gate (repository check, then staging check)
//! - [`has_commits`]: whether the repository has any history yet
//!
//! The ordering inside [`validate_state`] is load-bearing: "no repo" must be
//! reported before "no staged changes".

use crate::core::error::{AiCommitError, Result};
use crate::core::executor::GitClient;
use crate::core::status;

/// Check whether the client points inside a git repository.
///
/// Never errors: a repository failure maps to `false` silently, any other
/// failure is logged as a warning and also maps to `false`.
pub fn is_repository(git: &GitClient) -> bool {
    match git.run_safe(&["rev-parse", "--git-dir"], 1) {
        Ok(_) => true,
        Err(AiCommitError::Repository { .. }) => false,
        Err(err) => {
            log::warn!("error checking git repository status: {}", err);
            false
        }
    }
}

/// Check whether the index holds staged changes.
///
/// A repository failure is NOT swallowed here; callers need to distinguish
/// "no repo" from "no staged files". Other failures degrade to `false` with
/// a warning.
pub fn has_staged_changes(git: &GitClient) -> Result<bool> {
    match git.run_safe(&["diff", "--staged", "--name-only"], 1) {
        Ok(output) => Ok(!output.trim().is_empty()),
        Err(err @ AiCommitError::Repository { .. }) => Err(err),
        Err(err) => {
            log::warn!("error checking staged changes: {}", err);
            Ok(false)
        }
    }
}

/// Validate that the client is inside a repository with staged changes.
///
/// Repository check runs first; only then is the index inspected. When no
/// changes are staged the failure is enriched with unstaged/untracked counts
/// so the recovery hint can name a concrete remedy. If status retrieval
/// itself fails, a generic staging failure with zero counts is returned.
pub fn validate_state(git: &GitClient) -> Result<()> {
    if !is_repository(git) {
        return Err(AiCommitError::repository(
            "Not in a git repository. Please run this command from within a git repository.",
        ));
    }

    if !has_staged_changes(git)? {
        return match status::status(git) {
            Ok(repo_status) => Err(AiCommitError::staging(
                "No staged changes found",
                repo_status.unstaged.len(),
                repo_status.untracked.len(),
            )),
            Err(_) => Err(AiCommitError::staging(
                "No staged changes found. Please stage some changes before proceeding.",
                0,
                0,
            )),
        };
    }

    Ok(())
}

/// Check whether the repository has any commits.
///
/// Errors that merely mean "empty history" map to `false`; anything else is
/// logged and also maps to `false`.
pub fn has_commits(git: &GitClient) -> bool {
    match git.run_safe(&["log", "-1", "--oneline"], 1) {
        Ok(_) => true,
        Err(err) => {
            let text = match &err {
                AiCommitError::Command { original_error, .. } => original_error.clone(),
                other => other.to_string(),
            };
            if text.contains("does not have any commits yet")
                || text.contains("bad default revision")
                || text.contains("ambiguous argument 'HEAD'")
            {
                return false;
            }
            log::warn!("error checking commit history: {}", text);
            false
        }
    }
}
