//! Core git pipeline for ai-commit.
//!
//! This module provides the fundamental building blocks: subprocess
//! execution, repository-state validation, status and diff parsing, commit
//! execution, and error handling.

pub mod commit;
pub mod diff;
pub mod error;
pub mod executor;
pub mod output;
pub mod repository;
pub mod status;

// === Error handling ===
// Core error types and result type used throughout the application
pub use error::{AiCommitError, Result};

// === Subprocess execution ===
// Low-level git runner with failure classification and bounded retry
pub use executor::GitClient;

// === Repository validation ===
// Precondition gate composed of repository and staged-changes checks
pub use repository::{has_commits, has_staged_changes, is_repository, validate_state};

// === Status reading ===
// Porcelain parsing into typed staged/unstaged/untracked sets
pub use status::{detailed_status, status, DetailedStatus, RepositoryStatus};

// === Diff reading ===
// Numstat + unified-diff parsing into a typed diff representation
pub use diff::{staged_diff, DiffSet, DiffSummary, FileChange, FileStatus};

// === Commit execution ===
// Message validation, commit variants, and summary parsing
pub use commit::{
    commit, commit_with_body, last_commit, validate_message, CommitInfo, CommitResult,
};

// === Output formatting ===
// Unified output formatting for consistent CLI presentation
pub use output::{print_error, print_failure, print_info, print_section_header, print_success};
