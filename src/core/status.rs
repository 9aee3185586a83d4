//! Porcelain status parsing into typed staged/unstaged/untracked sets.
//!
//! # Public API
//! - [`RepositoryStatus`]: raw file sets from a single porcelain query
//! - [`DetailedStatus`]: counts, truncated file lists, and a summary line
//! - [`status`] / [`detailed_status`]: the corresponding queries
//!
//! Classification follows the two leading porcelain characters: index status
//! (byte 0) and worktree status (byte 1), path from offset 3. The rules are
//! applied independently, so a path may legitimately land in multiple sets.

use crate::core::error::Result;
use crate::core::executor::GitClient;
use serde::Serialize;

/// Number of file names kept per category in the detailed view.
const DISPLAY_LIMIT: usize = 5;

/// File sets derived transiently from one `status --porcelain` query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepositoryStatus {
    pub staged: Vec<String>,
    pub unstaged: Vec<String>,
    pub untracked: Vec<String>,
}

/// Per-category count with the first few file names for display.
#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub count: usize,
    pub files: Vec<String>,
}

/// Summarized, truncated status view for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct DetailedStatus {
    pub staged: CategorySummary,
    pub unstaged: CategorySummary,
    pub untracked: CategorySummary,
    pub summary: String,
}

/// Parse porcelain-format status output into typed file sets.
///
/// Lines shorter than 3 bytes are skipped as malformed.
pub fn parse_porcelain(output: &str) -> RepositoryStatus {
    let mut result = RepositoryStatus::default();

    for line in output.lines() {
        if line.trim().is_empty() || line.len() < 3 {
            continue;
        }

        let bytes = line.as_bytes();
        let index_status = bytes[0] as char;
        let worktree_status = bytes[1] as char;
        let path = &line[3..];

        if index_status != ' ' && index_status != '?' {
            result.staged.push(path.to_string());
        }
        if worktree_status != ' ' && worktree_status != '?' {
            result.unstaged.push(path.to_string());
        }
        if index_status == '?' && worktree_status == '?' {
            result.untracked.push(path.to_string());
        }
    }

    result
}

/// Run a porcelain status query and parse it.
pub fn status(git: &GitClient) -> Result<RepositoryStatus> {
    let output = git.run_safe(&["status", "--porcelain"], 1)?;
    Ok(parse_porcelain(&output))
}

/// Status with counts, truncated file lists, and a human summary line.
pub fn detailed_status(git: &GitClient) -> Result<DetailedStatus> {
    let repo_status = status(git)?;

    let summarize = |files: &[String]| CategorySummary {
        count: files.len(),
        files: files.iter().take(DISPLAY_LIMIT).cloned().collect(),
    };

    let staged = summarize(&repo_status.staged);
    let unstaged = summarize(&repo_status.unstaged);
    let untracked = summarize(&repo_status.untracked);

    let mut parts = Vec::new();
    if staged.count > 0 {
        parts.push(format!("{} staged file(s)", staged.count));
    }
    if unstaged.count > 0 {
        parts.push(format!("{} unstaged file(s)", unstaged.count));
    }
    if untracked.count > 0 {
        parts.push(format!("{} untracked file(s)", untracked.count));
    }

    let summary = if parts.is_empty() {
        "Working directory clean".to_string()
    } else {
        parts.join(", ")
    };

    Ok(DetailedStatus {
        staged,
        unstaged,
        untracked,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::process::Command;
    use tempfile::TempDir;

    #[test]
    fn test_parse_porcelain_basic_classification() {
        let output = "M  staged.rs\n M unstaged.rs\n?? untracked.rs\n";
        let status = parse_porcelain(output);
        assert_eq!(status.staged, vec!["staged.rs"]);
        assert_eq!(status.unstaged, vec!["unstaged.rs"]);
        assert_eq!(status.untracked, vec!["untracked.rs"]);
    }

    #[test]
    fn test_parse_porcelain_path_in_multiple_sets() {
        // Staged with further worktree modifications: both columns set
        let status = parse_porcelain("MM both.rs\n");
        assert_eq!(status.staged, vec!["both.rs"]);
        assert_eq!(status.unstaged, vec!["both.rs"]);
        assert!(status.untracked.is_empty());
    }

    #[test]
    fn test_parse_porcelain_untracked_not_double_counted() {
        let status = parse_porcelain("?? new.rs\n");
        assert!(status.staged.is_empty());
        assert!(status.unstaged.is_empty());
        assert_eq!(status.untracked, vec!["new.rs"]);
    }

    #[test]
    fn test_parse_porcelain_skips_short_lines() {
        let status = parse_porcelain("M\n\nA  added.rs\n");
        assert_eq!(status.staged, vec!["added.rs"]);
    }

    #[test]
    fn test_parse_porcelain_empty_output() {
        assert_eq!(parse_porcelain(""), RepositoryStatus::default());
    }

    fn setup_test_repo() -> (TempDir, GitClient) {
        let temp_dir = TempDir::new().expect("temp dir");
        let path = temp_dir.path().to_path_buf();

        for args in [
            vec!["init"],
            vec!["config", "user.name", "Test User"],
            vec!["config", "user.email", "test@example.com"],
        ] {
            Command::new("git")
                .args(&args)
                .current_dir(&path)
                .output()
                .expect("git setup");
        }

        (temp_dir, GitClient::in_dir(path))
    }

    #[test]
    fn test_status_clean_repo() {
        let (_temp, git) = setup_test_repo();
        let repo_status = status(&git).unwrap();
        assert_eq!(repo_status, RepositoryStatus::default());
    }

    #[test]
    fn test_status_mixed_states() {
        let (temp, git) = setup_test_repo();
        fs::write(temp.path().join("staged.txt"), "a").unwrap();
        fs::write(temp.path().join("untracked.txt"), "b").unwrap();
        git.run(&["add", "staged.txt"]).unwrap();

        let repo_status = status(&git).unwrap();
        assert_eq!(repo_status.staged, vec!["staged.txt"]);
        assert_eq!(repo_status.untracked, vec!["untracked.txt"]);
    }

    #[test]
    fn test_detailed_status_summary_clean() {
        let (_temp, git) = setup_test_repo();
        let detail = detailed_status(&git).unwrap();
        assert_eq!(detail.summary, "Working directory clean");
    }

    #[test]
    fn test_detailed_status_truncates_file_lists() {
        let (temp, git) = setup_test_repo();
        for i in 0..7 {
            fs::write(temp.path().join(format!("file{}.txt", i)), "x").unwrap();
        }

        let detail = detailed_status(&git).unwrap();
        assert_eq!(detail.untracked.count, 7);
        assert_eq!(detail.untracked.files.len(), 5);
        assert_eq!(detail.summary, "7 untracked file(s)");
    }
}
