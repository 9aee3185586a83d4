//! Diagnostics command: summarized repository status plus the last commit.

use crate::core::error::Result;
use crate::core::{output, repository, status, GitClient};
use crate::core::commit;
use colored::*;

pub fn execute_status(git: &GitClient) -> Result<()> {
    let detail = status::detailed_status(git)?;

    output::print_section_header("Repository Status");
    println!("  {}", detail.summary.white().bold());

    print_category("Staged", &detail.staged);
    print_category("Unstaged", &detail.unstaged);
    print_category("Untracked", &detail.untracked);

    if repository::has_commits(git) {
        let last = commit::last_commit(git)?;
        println!(
            "\n{} {} {} ({}, {})",
            "Last commit:".blue(),
            last.hash.chars().take(7).collect::<String>().yellow(),
            last.subject.white(),
            last.author,
            last.date
        );
    } else {
        println!("\n{}", "No commits yet".bright_black());
    }
    println!();

    Ok(())
}

fn print_category(label: &str, category: &status::CategorySummary) {
    if category.count == 0 {
        return;
    }
    println!("\n  {} ({}):", label.blue(), category.count);
    for path in &category.files {
        println!("    {}", path.white());
    }
    if category.count > category.files.len() {
        println!(
            "    {}",
            format!("... and {} more", category.count - category.files.len()).bright_black()
        );
    }
}
