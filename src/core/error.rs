//! Domain-specific error types and recovery hints.
//!
//! This module defines [`AiCommitError`] which covers every failure mode of the
//! git pipeline and the model client. It uses `thiserror` for ergonomic error
//! definitions and attaches a machine-readable code plus a human recovery hint
//! to each failure.
//!
//! # Public API
//! - [`AiCommitError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, AiCommitError>`
//!
//! # Error Categories
//! - **Repository**: Not inside a git repository (terminal, never retried)
//! - **Staging**: No staged changes, enriched with unstaged/untracked counts
//! - **Command**: Generic subprocess failure, retried only when transient
//! - **Commit**: Commit-specific failure with a remedy matched from git's text
//! - **Ollama**: Model-service failures (connection, missing model, timeout)

use thiserror::Error;

/// Domain-specific error types for ai-commit
#[derive(Error, Debug)]
pub enum AiCommitError {
    // Git repository errors
    #[error("{message}")]
    Repository { message: String },

    #[error("{message}")]
    Staging {
        message: String,
        unstaged_count: usize,
        untracked_count: usize,
    },

    #[error("Git command failed: {command}")]
    Command {
        command: String,
        original_error: String,
        exit_code: Option<i32>,
    },

    #[error("{message}")]
    Commit {
        message: String,
        original_error: Option<String>,
    },

    // Model-service errors
    #[error("{message}")]
    Ollama {
        message: String,
        original_error: Option<String>,
    },

    #[error("{message}")]
    InvalidResponse { message: String },

    // Ambient errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using AiCommitError
pub type Result<T> = std::result::Result<T, AiCommitError>;

impl AiCommitError {
    /// Create a repository error with the standard message
    pub fn repository(message: impl Into<String>) -> Self {
        Self::Repository {
            message: message.into(),
        }
    }

    /// Create a staging error carrying unstaged/untracked counts
    pub fn staging(
        message: impl Into<String>,
        unstaged_count: usize,
        untracked_count: usize,
    ) -> Self {
        Self::Staging {
            message: message.into(),
            unstaged_count,
            untracked_count,
        }
    }

    /// Create a generic subprocess failure
    pub fn command(
        command: impl Into<String>,
        original_error: impl Into<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self::Command {
            command: command.into(),
            original_error: original_error.into(),
            exit_code,
        }
    }

    /// Create a commit failure wrapping the underlying tool error text
    pub fn commit(message: impl Into<String>, original_error: Option<String>) -> Self {
        Self::Commit {
            message: message.into(),
            original_error,
        }
    }

    /// Create a model-service failure wrapping the underlying error text
    pub fn ollama(message: impl Into<String>, original_error: Option<String>) -> Self {
        Self::Ollama {
            message: message.into(),
            original_error,
        }
    }

    /// Create a malformed-model-output failure
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Machine-readable failure code for scripting and diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::Repository { .. } => "NOT_A_REPOSITORY",
            Self::Staging { .. } => "NO_STAGED_CHANGES",
            Self::Command { .. } => "COMMAND_FAILED",
            Self::Commit { .. } => "COMMIT_FAILED",
            Self::Ollama { .. } => "OLLAMA_ERROR",
            Self::InvalidResponse { .. } => "INVALID_FORMAT",
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
        }
    }

    /// Whether a retry is likely to succeed. Only lock contention qualifies;
    /// repository and staging failures are structural.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Command { original_error, .. } => original_error.contains("index.lock"),
            _ => false,
        }
    }

    /// Human recovery hint, selected by matching the underlying tool's error
    /// text against known patterns.
    pub fn recovery_hint(&self) -> String {
        match self {
            Self::Repository { .. } => "Make sure you are running this command from within a \
                 git repository. Use \"git init\" to initialize a new repository."
                .to_string(),
            Self::Staging {
                unstaged_count,
                untracked_count,
                ..
            } => {
                let mut hints = Vec::new();
                if *unstaged_count > 0 {
                    hints.push(format!(
                        "Stage {} unstaged file(s): git add <files>",
                        unstaged_count
                    ));
                }
                if *untracked_count > 0 {
                    hints.push(format!(
                        "Stage {} untracked file(s): git add <files>",
                        untracked_count
                    ));
                }
                if hints.is_empty() {
                    hints.push("Make some changes and stage them: git add <files>".to_string());
                }
                hints.join("\n")
            }
            Self::Command { original_error, .. } => {
                if original_error.contains("not a git repository") {
                    "Initialize a git repository with \"git init\" or navigate to an \
                     existing repository."
                        .to_string()
                } else if original_error.contains("Permission denied") {
                    "Check file permissions and ensure you have write access to the \
                     repository."
                        .to_string()
                } else if original_error.contains("not a valid object name") {
                    "The repository may be empty or corrupted. Try making an initial commit."
                        .to_string()
                } else if original_error.contains("index.lock") {
                    "Another git process may be running. Wait for it to finish or remove \
                     .git/index.lock if stuck."
                        .to_string()
                } else {
                    "Check the command and try again.".to_string()
                }
            }
            Self::Commit { original_error, .. } => {
                let original = original_error.as_deref().unwrap_or("");
                if original.contains("Please tell me who you are") {
                    "Configure your git identity:\n  git config --global user.name \"Your \
                     Name\"\n  git config --global user.email \"your.email@example.com\""
                        .to_string()
                } else if original.contains("nothing to commit") {
                    "Stage some changes before committing:\n  git add <files>  # Stage \
                     specific files\n  git add .        # Stage all changes"
                        .to_string()
                } else if original.contains("pathspec") && original.contains("did not match") {
                    "Check that the files you're trying to add exist and try again.".to_string()
                } else {
                    "Check your git configuration and try again.".to_string()
                }
            }
            Self::Ollama { original_error, .. } => {
                let original = original_error.as_deref().unwrap_or("");
                if original.contains("Connection refused") || original.contains("connect") {
                    "Ollama is not running. Start it with:\n  ollama serve\nOr install it \
                     with:\n  brew install ollama"
                        .to_string()
                } else if original.contains("model") && original.contains("not found") {
                    "The specified model is not available. Pull it with:\n  ollama pull \
                     <model-name>\nOr list available models with:\n  ollama list"
                        .to_string()
                } else {
                    "Check that Ollama is installed and running.".to_string()
                }
            }
            Self::InvalidResponse { .. } => "Try regenerating the message, or pass a commit \
                 message explicitly."
                .to_string(),
            _ => "Check the error above and retry.".to_string(),
        }
    }
}
