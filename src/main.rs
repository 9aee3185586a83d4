use ai_commit::commands::{execute_generate, execute_status, CommitMode};
use ai_commit::core::{output, GitClient, Result};
use ai_commit::llm::{LlmConfig, OllamaClient};
use clap::{Parser, Subcommand};
use std::env;

#[derive(Parser)]
#[command(name = "ai-commit")]
#[command(about = "Generate conventional commit messages from staged changes using a local LLM")]
#[command(version = "0.1.0")]
struct Cli {
    /// Optional commit message to use instead of a generated one
    message: Option<String>,

    /// Generate and commit immediately without confirmation
    #[arg(short, long)]
    auto: bool,

    /// Generate the commit message only (do not commit)
    #[arg(short, long)]
    dry_run: bool,

    /// LLM model to use
    #[arg(short, long, default_value = "llama3.2:3b")]
    model: String,

    /// Base URL of the Ollama service
    #[arg(long, default_value = "http://localhost:11434")]
    base_url: String,

    /// Disable automatic scope detection
    #[arg(long = "no-scope")]
    no_scope: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show repository status diagnostics
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let git = GitClient::new();

    let result = match cli.command {
        Some(Commands::Status) => execute_status(&git),
        None => {
            let config = LlmConfig {
                base_url: cli.base_url,
                model: cli.model,
                ..LlmConfig::default()
            };
            let mode = if cli.dry_run {
                CommitMode::DryRun
            } else if cli.auto {
                CommitMode::Auto
            } else {
                CommitMode::Confirm
            };

            OllamaClient::new(config).and_then(|client| {
                execute_generate(&git, &client, mode, !cli.no_scope, cli.message.as_deref())
            })
        }
    };

    if let Err(e) = result {
        output::print_failure(&e);
        std::process::exit(1);
    }

    Ok(())
}
