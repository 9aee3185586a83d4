//! Integration tests for the git pipeline: validation gate, diff reading,
//! and commit execution against real repositories.

mod common;
use common::repository::*;

use ai_commit::core::{commit, diff, repository, status, AiCommitError, FileStatus, GitClient};

#[test]
fn test_validation_gate_ordering_outside_repo() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    let git = GitClient::in_dir(temp.path());

    // Both "no repo" and "no staged changes" hold; the repository failure
    // must win
    let err = repository::validate_state(&git).unwrap_err();
    assert_eq!(err.code(), "NOT_A_REPOSITORY");
    Ok(())
}

#[test]
fn test_validation_gate_staging_counts() -> anyhow::Result<()> {
    let repo = setup_test_repo_with_initial_commit()?;
    let git = GitClient::in_dir(repo.path());

    create_file(&repo.path, "initial.txt", "modified content\n")?;
    create_file(&repo.path, "brand-new.txt", "untracked content\n")?;

    let err = repository::validate_state(&git).unwrap_err();
    match err {
        AiCommitError::Staging {
            unstaged_count,
            untracked_count,
            ..
        } => {
            assert_eq!(unstaged_count, 1);
            assert_eq!(untracked_count, 1);
        }
        other => panic!("expected Staging error, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_status_sets_across_index_and_worktree() -> anyhow::Result<()> {
    let repo = setup_test_repo_with_initial_commit()?;
    let git = GitClient::in_dir(repo.path());

    // Stage a change, then modify again: the path lands in both sets
    create_file(&repo.path, "initial.txt", "staged change\n")?;
    git_add(&repo.path, "initial.txt")?;
    create_file(&repo.path, "initial.txt", "worktree change\n")?;

    let repo_status = status::status(&git)?;
    assert!(repo_status.staged.contains(&"initial.txt".to_string()));
    assert!(repo_status.unstaged.contains(&"initial.txt".to_string()));
    assert!(!repo_status.untracked.contains(&"initial.txt".to_string()));
    Ok(())
}

#[test]
fn test_staged_diff_full_pipeline() -> anyhow::Result<()> {
    let repo = setup_test_repo_with_initial_commit()?;
    let git = GitClient::in_dir(repo.path());

    create_file(&repo.path, "initial.txt", "initial content\nplus a line\n")?;
    create_file(&repo.path, "src_new.rs", "fn fresh() {}\n")?;
    git_add(&repo.path, "initial.txt")?;
    git_add(&repo.path, "src_new.rs")?;

    let diff_set = diff::staged_diff(&git)?;
    assert_eq!(diff_set.summary.files_changed, 2);
    assert_eq!(
        diff_set.summary.additions,
        diff_set.files.iter().map(|f| f.additions).sum::<u32>()
    );
    assert_eq!(
        diff_set.summary.deletions,
        diff_set.files.iter().map(|f| f.deletions).sum::<u32>()
    );

    let added = diff_set
        .files
        .iter()
        .find(|f| f.path == "src_new.rs")
        .expect("new file present");
    assert_eq!(added.status, FileStatus::Added);
    assert!(added.diff.contains("+fn fresh() {}"));

    let modified = diff_set
        .files
        .iter()
        .find(|f| f.path == "initial.txt")
        .expect("modified file present");
    assert_eq!(modified.status, FileStatus::Modified);
    assert!(!modified.diff.contains("fresh"));
    Ok(())
}

#[test]
fn test_staged_diff_deleted_file_classification() -> anyhow::Result<()> {
    let repo = setup_test_repo_with_initial_commit()?;
    let git = GitClient::in_dir(repo.path());

    std::fs::remove_file(repo.path.join("initial.txt"))?;
    git_add(&repo.path, "initial.txt")?;

    let diff_set = diff::staged_diff(&git)?;
    assert_eq!(diff_set.files[0].status, FileStatus::Deleted);
    Ok(())
}

#[test]
fn test_commit_round_trip_with_body() -> anyhow::Result<()> {
    let repo = setup_test_repo()?;
    let git = GitClient::in_dir(repo.path());

    create_file(&repo.path, "feature.rs", "pub fn feature() {}\n")?;
    git_add(&repo.path, "feature.rs")?;

    let result = commit::commit_with_body(
        &git,
        "feat(core): add feature entry point",
        Some("Wires the new feature into the public API."),
    )?;
    assert_ne!(result.hash, "unknown");
    assert_eq!(result.files_changed, 1);

    assert_eq!(
        last_commit_subject(&repo.path)?,
        "feat(core): add feature entry point"
    );

    let info = commit::last_commit(&git)?;
    assert_eq!(info.subject, "feat(core): add feature entry point");
    assert_eq!(info.author, "Test User");
    Ok(())
}

#[test]
fn test_commit_failure_surfaces_recovery_hint() -> anyhow::Result<()> {
    let repo = setup_test_repo()?;
    let git = GitClient::in_dir(repo.path());

    let err = commit::commit(&git, "feat: nothing staged here").unwrap_err();
    assert_eq!(err.code(), "NO_STAGED_CHANGES");
    assert!(err.recovery_hint().contains("git add"));
    Ok(())
}
