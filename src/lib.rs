//! AI Commit - generate conventional commit messages from staged git changes
//! using a locally running language model.
//!
//! This library provides the git pipeline (subprocess execution, state
//! validation, status and diff parsing, commit execution), the model-service
//! client, and the heuristic diff analyzer that feeds the prompt.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module:
//! - Git subprocess execution with retry
//! - Repository state validation
//! - Status and diff reading
//! - Commit execution with recovery hints
//! - Error handling and result types

pub mod analyzer;
pub mod commands;
pub mod core;
pub mod llm;

// Re-export the core public API for external users
pub use crate::core::{
    commit,
    commit_with_body,
    detailed_status,
    has_commits,
    has_staged_changes,
    is_repository,
    last_commit,
    // Error handling
    AiCommitError,
    CommitInfo,
    CommitResult,
    DetailedStatus,
    DiffSet,
    DiffSummary,
    FileChange,
    FileStatus,
    // Git operations
    GitClient,
    RepositoryStatus,
    Result,

    staged_diff,
    status,
    validate_message,
    validate_state,
};

pub use analyzer::{analyze_diff, DiffAnalysis};
pub use llm::{LlmConfig, OllamaClient};
