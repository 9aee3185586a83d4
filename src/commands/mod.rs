//! Command implementations for the ai-commit CLI.

pub mod generate;
pub mod status;

pub use generate::{execute_generate, CommitMode};
pub use status::execute_status;
