//! Prompt construction and model-response parsing.
//!
//! The prompt spells out the conventional-commit contract, folds in the
//! analyzer's suggestions, and fences the diff. The response parser accepts
//! only a well-formed `type(scope): description` first line and treats the
//! remaining lines as the body.

use crate::analyzer::DiffAnalysis;
use crate::core::error::{AiCommitError, Result};

/// Types the model is allowed to emit.
const RESPONSE_TYPES: &[&str] = &[
    "feat", "fix", "docs", "style", "refactor", "perf", "test", "build", "ci", "chore", "revert",
];

const MAX_DESCRIPTION_LEN: usize = 72;

/// A model response decomposed into conventional-commit parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommitMessage {
    pub commit_type: String,
    pub scope: Option<String>,
    pub description: String,
    pub body: Option<String>,
}

impl ParsedCommitMessage {
    /// The reassembled subject line.
    pub fn subject(&self) -> String {
        match &self.scope {
            Some(scope) => format!("{}({}): {}", self.commit_type, scope, self.description),
            None => format!("{}: {}", self.commit_type, self.description),
        }
    }
}

/// Build the generation prompt from the diff text and analyzer hints.
pub fn build_commit_prompt(diff: &str, analysis: &DiffAnalysis) -> String {
    let mut analysis_lines = Vec::new();
    if let Some(ty) = &analysis.suggested_type {
        analysis_lines.push(format!("Suggested type: {}", ty));
    }
    if let Some(scope) = &analysis.suggested_scope {
        analysis_lines.push(format!("Suggested scope: {}", scope));
    }
    if !analysis.file_types.is_empty() {
        analysis_lines.push(format!("File types: {}", analysis.file_types.join(", ")));
    }
    if !analysis.changes_summary.is_empty() {
        analysis_lines.push(format!("Summary: {}", analysis.changes_summary));
    }

    format!(
        "You are an expert developer assistant that generates conventional commit messages.\n\
         \n\
         TASK: Generate a conventional commit message based on the git diff provided.\n\
         \n\
         CONVENTIONAL COMMIT FORMAT:\n\
         <type>(<scope>): <description>\n\
         \n\
         VALID TYPES:\n\
         - feat: New features\n\
         - fix: Bug fixes\n\
         - refactor: Code restructuring without behavior change\n\
         - perf: Performance improvements\n\
         - style: Code style changes (formatting, etc.)\n\
         - test: Test changes\n\
         - docs: Documentation changes\n\
         - build: Build system changes\n\
         - ci: Continuous integration changes\n\
         - chore: Miscellaneous changes\n\
         \n\
         RULES:\n\
         1. Use lowercase for type and scope\n\
         2. Keep description under 72 characters\n\
         3. Use imperative mood (\"add\" not \"added\")\n\
         4. No period at the end of description\n\
         5. Be specific and concise\n\
         6. Focus on WHAT changed, not HOW\n\
         \n\
         ANALYSIS:\n\
         {}\n\
         \n\
         GIT DIFF:\n\
         ```\n\
         {}\n\
         ```\n\
         \n\
         Generate ONLY the commit message in the format: <type>(<scope>): <description>\n\
         If no scope is appropriate, use: <type>: <description>\n\
         \n\
         COMMIT MESSAGE:",
        analysis_lines.join("\n"),
        diff
    )
}

/// Parse and validate the model's response.
///
/// The leading "COMMIT MESSAGE:" label is stripped if the model echoed it.
/// The first line must be a well-formed conventional commit with a
/// description of at most 72 characters; the remaining lines become the body.
pub fn parse_response(response: &str) -> Result<ParsedCommitMessage> {
    let cleaned = response.trim();
    let cleaned = strip_label(cleaned);

    let mut lines = cleaned.lines();
    let first_line = lines.next().unwrap_or_default().trim();

    let Some(parsed) = parse_subject(first_line) else {
        return Err(AiCommitError::invalid_response(
            "Generated message does not follow conventional commit format",
        ));
    };

    if parsed.description.len() > MAX_DESCRIPTION_LEN {
        return Err(AiCommitError::invalid_response(format!(
            "Generated description is too long (max {} characters)",
            MAX_DESCRIPTION_LEN
        )));
    }

    let body = lines.collect::<Vec<_>>().join("\n").trim().to_string();
    Ok(ParsedCommitMessage {
        body: if body.is_empty() { None } else { Some(body) },
        ..parsed
    })
}

fn strip_label(response: &str) -> &str {
    let lower = response.to_ascii_lowercase();
    if lower.starts_with("commit message:") {
        response["commit message:".len()..].trim_start()
    } else {
        response
    }
}

fn parse_subject(line: &str) -> Option<ParsedCommitMessage> {
    let (prefix, description) = line.split_once(": ")?;
    if description.is_empty() {
        return None;
    }

    let (commit_type, scope) = match prefix.split_once('(') {
        Some((ty, rest)) => {
            let scope = rest.strip_suffix(')')?;
            if scope.is_empty() {
                return None;
            }
            (ty, Some(scope.to_string()))
        }
        None => (prefix, None),
    };

    if !RESPONSE_TYPES.contains(&commit_type) {
        return None;
    }

    Some(ParsedCommitMessage {
        commit_type: commit_type.to_string(),
        scope,
        description: description.to_string(),
        body: None,
    })
}
