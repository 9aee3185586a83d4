//! Model-service collaborator: Ollama client, prompt building, and the
//! high-level generation flow.

pub mod client;
pub mod prompt;

pub use client::{LlmConfig, LlmResponse, OllamaClient};
pub use prompt::{build_commit_prompt, parse_response, ParsedCommitMessage};

use crate::core::error::{AiCommitError, Result};

/// Generate a commit message for the given prompt.
///
/// Checks service availability, pulls the configured model when it is not
/// present locally, then requests a completion.
pub fn generate_commit_message(client: &OllamaClient, prompt: &str) -> Result<LlmResponse> {
    if !client.is_available() {
        return Err(AiCommitError::ollama(
            "Ollama is not available or not running",
            Some("Connection refused".to_string()),
        ));
    }

    let model = client.config().model.clone();
    if !client.has_model(&model) {
        log::warn!("model {} not found locally, attempting to pull", model);
        client.pull_model(&model)?;
    }

    client.generate(prompt)
}
