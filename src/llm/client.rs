//! Blocking HTTP client for a local Ollama-style inference service.
//!
//! Three endpoints are used: `GET /api/tags` for availability and model
//! listing, `POST /api/generate` for completions, and `POST /api/pull` for
//! model downloads with streamed NDJSON progress. Generation requests are
//! bounded by a 30-second timeout, pulls by 5 minutes.

use crate::core::error::{AiCommitError, Result};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader};
use std::time::Duration;

/// Model-service connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_pull_timeout_secs")]
    pub pull_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3.2:3b".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_pull_timeout_secs() -> u64 {
    300
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            pull_timeout_secs: default_pull_timeout_secs(),
        }
    }
}

/// Generated text with token accounting.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    prompt_eval_count: Option<u32>,
    #[serde(default)]
    eval_count: Option<u32>,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Deserialize)]
struct ModelTag {
    name: String,
}

#[derive(Serialize)]
struct PullRequest<'a> {
    name: &'a str,
}

#[derive(Deserialize)]
struct PullProgress {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    completed: Option<u64>,
    #[serde(default)]
    total: Option<u64>,
}

/// Client for a local Ollama-compatible inference endpoint.
pub struct OllamaClient {
    http: reqwest::blocking::Client,
    config: LlmConfig,
}

impl OllamaClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| AiCommitError::ollama("Failed to build HTTP client", Some(e.to_string())))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Whether the service responds to the tags endpoint.
    /// Failures are logged and map to `false`.
    pub fn is_available(&self) -> bool {
        let result = self
            .http
            .get(self.endpoint("/api/tags"))
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .send();
        match result {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                log::warn!("Ollama availability check failed: {}", err);
                false
            }
        }
    }

    /// Names of the models the service has locally.
    pub fn available_models(&self) -> Result<Vec<String>> {
        let response = self
            .http
            .get(self.endpoint("/api/tags"))
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .send()
            .map_err(|e| {
                AiCommitError::ollama("Failed to connect to Ollama", Some(e.to_string()))
            })?;

        if !response.status().is_success() {
            return Err(AiCommitError::ollama(
                format!("Failed to get models: {}", response.status()),
                None,
            ));
        }

        let tags: TagsResponse = response.json().map_err(|e| {
            AiCommitError::ollama("Failed to parse model list", Some(e.to_string()))
        })?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    /// Whether the named model is available locally.
    /// Failures are logged and map to `false`.
    pub fn has_model(&self, model: &str) -> bool {
        match self.available_models() {
            Ok(models) => models.iter().any(|m| m == model),
            Err(err) => {
                log::warn!("model availability check failed for {}: {}", model, err);
                false
            }
        }
    }

    /// Pull a model, logging streamed progress updates.
    pub fn pull_model(&self, model: &str) -> Result<()> {
        log::info!("pulling model {}", model);

        let response = self
            .http
            .post(self.endpoint("/api/pull"))
            .timeout(Duration::from_secs(self.config.pull_timeout_secs))
            .json(&PullRequest { name: model })
            .send()
            .map_err(|e| {
                AiCommitError::ollama(
                    format!("Failed to pull model {}", model),
                    Some(e.to_string()),
                )
            })?;

        if !response.status().is_success() {
            return Err(AiCommitError::ollama(
                format!("Failed to pull model {}: {}", model, response.status()),
                None,
            ));
        }

        // The pull endpoint streams NDJSON progress lines; invalid lines are
        // ignored
        let reader = BufReader::new(response);
        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(_) => break,
            };
            if line.trim().is_empty() {
                continue;
            }
            if let Ok(progress) = serde_json::from_str::<PullProgress>(&line) {
                if let Some(status) = progress.status {
                    match (progress.completed, progress.total) {
                        (Some(completed), Some(total)) if total > 0 => {
                            let percent = completed * 100 / total;
                            log::info!("{} {}%", status, percent);
                        }
                        _ => log::info!("{}", status),
                    }
                }
            }
        }

        log::info!("model {} pulled successfully", model);
        Ok(())
    }

    /// Generate a completion for the prompt.
    ///
    /// Low temperature and a modest prediction cap keep the output shaped
    /// like a commit message.
    pub fn generate(&self, prompt: &str) -> Result<LlmResponse> {
        let request = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: 0.1,
                num_predict: 200,
            },
        };

        let response = self
            .http
            .post(self.endpoint("/api/generate"))
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .json(&request)
            .send()
            .map_err(|e| {
                AiCommitError::ollama("Failed to generate with Ollama", Some(e.to_string()))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(AiCommitError::ollama(
                format!("Generation failed: {}", status),
                Some(body),
            ));
        }

        let data: GenerateResponse = response.json().map_err(|e| {
            AiCommitError::ollama("Failed to parse generation response", Some(e.to_string()))
        })?;

        let Some(content) = data.response else {
            return Err(AiCommitError::ollama("No response from model", None));
        };

        Ok(LlmResponse {
            content: content.trim().to_string(),
            prompt_tokens: data.prompt_eval_count.unwrap_or(0),
            completion_tokens: data.eval_count.unwrap_or(0),
        })
    }
}
