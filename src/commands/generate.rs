//! The end-to-end generate flow: validate state, read the staged diff,
//! analyze it, ask the model for a message, then commit (immediately, after
//! confirmation, or not at all for a dry run).

use crate::analyzer;
use crate::core::error::Result;
use crate::core::{commit, diff, output, GitClient};
use crate::llm::{self, OllamaClient, ParsedCommitMessage};
use colored::*;
use std::io::{self, BufRead, Write};

/// How the generated message is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitMode {
    /// Print the message and ask before committing
    Confirm,
    /// Commit immediately
    Auto,
    /// Generate only, never commit
    DryRun,
}

/// Generate a commit message for the staged changes and apply it per `mode`.
///
/// An `override_message` skips generation entirely and commits the given
/// text. Diff text longer than the prompt budget is truncated at a file
/// boundary.
pub fn execute_generate(
    git: &GitClient,
    client: &OllamaClient,
    mode: CommitMode,
    detect_scope: bool,
    override_message: Option<&str>,
) -> Result<()> {
    if let Some(message) = override_message {
        return apply_message(git, message, None, mode);
    }

    let diff_set = diff::staged_diff(git)?;
    let analysis = analyzer::analyze_diff(&diff_set, detect_scope);
    let diff_text = prompt_diff_text(&diff_set);

    let prompt = llm::build_commit_prompt(&diff_text, &analysis);
    let response = llm::generate_commit_message(client, &prompt)?;
    let parsed = llm::parse_response(&response.content)?;

    log::debug!(
        "generated message with {} prompt / {} completion tokens",
        response.prompt_tokens,
        response.completion_tokens
    );

    apply_parsed(git, &parsed, mode)
}

/// Upper bound on diff text handed to the model.
const MAX_PROMPT_DIFF_LEN: usize = 12_000;

/// Concatenate per-file diffs, truncating at a file boundary once the prompt
/// budget is reached.
fn prompt_diff_text(diff_set: &diff::DiffSet) -> String {
    let mut text = String::new();
    let mut omitted = 0usize;

    for file in &diff_set.files {
        if text.len() + file.diff.len() > MAX_PROMPT_DIFF_LEN && !text.is_empty() {
            omitted += 1;
            continue;
        }
        if !file.diff.is_empty() {
            text.push_str(&file.diff);
            text.push('\n');
        }
    }

    if omitted > 0 {
        text.push_str(&format!("... ({} file diff(s) omitted for length)\n", omitted));
    }

    text
}

fn apply_parsed(git: &GitClient, parsed: &ParsedCommitMessage, mode: CommitMode) -> Result<()> {
    let subject = parsed.subject();
    apply_message(git, &subject, parsed.body.as_deref(), mode)
}

fn apply_message(
    git: &GitClient,
    subject: &str,
    body: Option<&str>,
    mode: CommitMode,
) -> Result<()> {
    println!("\n{}", "Generated commit message:".blue());
    println!("  {}", subject.white().bold());
    if let Some(body) = body {
        for line in body.lines() {
            println!("  {}", line.white());
        }
    }

    match mode {
        CommitMode::DryRun => {
            output::print_info("Dry run: no commit was made");
            Ok(())
        }
        CommitMode::Auto => do_commit(git, subject, body),
        CommitMode::Confirm => {
            if confirm("Commit with this message?")? {
                do_commit(git, subject, body)
            } else {
                output::print_info("Commit aborted");
                Ok(())
            }
        }
    }
}

fn do_commit(git: &GitClient, subject: &str, body: Option<&str>) -> Result<()> {
    let result = match body {
        Some(_) => commit::commit_with_body(git, subject, body)?,
        None => commit::commit(git, subject)?,
    };

    output::print_success(&format!("Commit successful: {}", result.hash));
    if result.files_changed > 0 {
        println!(
            "  {} file(s) changed, {} insertion(s), {} deletion(s)",
            result.files_changed, result.insertions, result.deletions
        );
    }
    println!();
    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("\n{} [y/N] ", question.blue());
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}
