//! Heuristic diff analysis feeding the prompt builder.
//!
//! Suggestions are hints, not verdicts: the model sees them alongside the
//! diff and is free to disagree. Scope detection can be disabled from the
//! CLI.

use crate::core::diff::{DiffSet, FileStatus};
use std::collections::BTreeSet;

/// Analyzer output carried into the prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffAnalysis {
    pub suggested_type: Option<String>,
    pub suggested_scope: Option<String>,
    pub file_types: Vec<String>,
    pub changes_summary: String,
}

/// Analyze a diff for type/scope suggestions and a one-line summary.
pub fn analyze_diff(diff: &DiffSet, detect_scope: bool) -> DiffAnalysis {
    DiffAnalysis {
        suggested_type: detect_commit_type(diff),
        suggested_scope: if detect_scope {
            detect_scope_component(diff)
        } else {
            None
        },
        file_types: file_types(diff),
        changes_summary: format!(
            "{} file(s) changed (+{}/-{})",
            diff.summary.files_changed, diff.summary.additions, diff.summary.deletions
        ),
    }
}

/// Suggest a commit type from the shape of the change set.
fn detect_commit_type(diff: &DiffSet) -> Option<String> {
    if diff.files.is_empty() {
        return None;
    }

    let all = |pred: fn(&str) -> bool| diff.files.iter().all(|f| pred(&f.path));

    if all(is_docs_path) {
        return Some("docs".to_string());
    }
    if all(is_test_path) {
        return Some("test".to_string());
    }
    if all(is_build_path) {
        return Some("build".to_string());
    }
    if diff
        .files
        .iter()
        .any(|f| f.status == FileStatus::Added && !is_test_path(&f.path))
    {
        return Some("feat".to_string());
    }
    None
}

fn is_docs_path(path: &str) -> bool {
    path.starts_with("docs/") || path.ends_with(".md") || path.ends_with(".rst")
}

fn is_test_path(path: &str) -> bool {
    path.starts_with("tests/")
        || path.contains("/tests/")
        || path.contains(".test.")
        || path.contains("_test.")
        || path.ends_with("_test.rs")
}

fn is_build_path(path: &str) -> bool {
    matches!(
        path.rsplit('/').next().unwrap_or(path),
        "Cargo.toml" | "Cargo.lock" | "package.json" | "Makefile" | "Dockerfile"
    )
}

/// Suggest a scope when every file shares a meaningful first path component.
fn detect_scope_component(diff: &DiffSet) -> Option<String> {
    let mut components = BTreeSet::new();
    for file in &diff.files {
        let mut parts = file.path.splitn(3, '/');
        let first = parts.next()?;
        // Skip the conventional source root so "src/parser/x.rs" scopes to
        // "parser", not "src"
        let component = if first == "src" { parts.next()? } else { first };
        // A bare filename at the repository root carries no scope
        if !component.contains('.') || parts.next().is_some() {
            components.insert(component.to_string());
        } else {
            return None;
        }
    }

    if components.len() == 1 {
        components.into_iter().next()
    } else {
        None
    }
}

/// Distinct file extensions across the change set, sorted.
fn file_types(diff: &DiffSet) -> Vec<String> {
    let mut types = BTreeSet::new();
    for file in &diff.files {
        if let Some((_, ext)) = file.path.rsplit_once('.') {
            if !ext.contains('/') {
                types.insert(ext.to_string());
            }
        }
    }
    types.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::diff::{DiffSummary, FileChange};

    fn change(path: &str, status: FileStatus, additions: u32, deletions: u32) -> FileChange {
        FileChange {
            path: path.to_string(),
            status,
            additions,
            deletions,
            diff: String::new(),
        }
    }

    fn diff_set(files: Vec<FileChange>) -> DiffSet {
        let summary = DiffSummary {
            additions: files.iter().map(|f| f.additions).sum(),
            deletions: files.iter().map(|f| f.deletions).sum(),
            files_changed: files.len(),
        };
        DiffSet { files, summary }
    }

    #[test]
    fn test_docs_only_changes_suggest_docs() {
        let diff = diff_set(vec![
            change("README.md", FileStatus::Modified, 3, 1),
            change("docs/guide.md", FileStatus::Modified, 5, 0),
        ]);
        let analysis = analyze_diff(&diff, true);
        assert_eq!(analysis.suggested_type.as_deref(), Some("docs"));
    }

    #[test]
    fn test_test_only_changes_suggest_test() {
        let diff = diff_set(vec![change(
            "tests/diff_tests.rs",
            FileStatus::Modified,
            8,
            2,
        )]);
        let analysis = analyze_diff(&diff, true);
        assert_eq!(analysis.suggested_type.as_deref(), Some("test"));
    }

    #[test]
    fn test_new_source_file_suggests_feat() {
        let diff = diff_set(vec![
            change("src/parser/lexer.rs", FileStatus::Added, 50, 0),
            change("src/parser/mod.rs", FileStatus::Modified, 2, 0),
        ]);
        let analysis = analyze_diff(&diff, true);
        assert_eq!(analysis.suggested_type.as_deref(), Some("feat"));
        assert_eq!(analysis.suggested_scope.as_deref(), Some("parser"));
    }

    #[test]
    fn test_modification_only_suggests_nothing() {
        let diff = diff_set(vec![change("src/main.rs", FileStatus::Modified, 1, 1)]);
        let analysis = analyze_diff(&diff, true);
        assert_eq!(analysis.suggested_type, None);
    }

    #[test]
    fn test_scope_detection_disabled() {
        let diff = diff_set(vec![change("src/parser/lexer.rs", FileStatus::Added, 1, 0)]);
        let analysis = analyze_diff(&diff, false);
        assert_eq!(analysis.suggested_scope, None);
    }

    #[test]
    fn test_no_common_scope_across_components() {
        let diff = diff_set(vec![
            change("src/parser/lexer.rs", FileStatus::Modified, 1, 0),
            change("src/cli/args.rs", FileStatus::Modified, 1, 0),
        ]);
        let analysis = analyze_diff(&diff, true);
        assert_eq!(analysis.suggested_scope, None);
    }

    #[test]
    fn test_file_types_sorted_and_distinct() {
        let diff = diff_set(vec![
            change("src/a.rs", FileStatus::Modified, 1, 0),
            change("src/b.rs", FileStatus::Modified, 1, 0),
            change("README.md", FileStatus::Modified, 1, 0),
        ]);
        let analysis = analyze_diff(&diff, true);
        assert_eq!(analysis.file_types, vec!["md", "rs"]);
    }

    #[test]
    fn test_changes_summary_format() {
        let diff = diff_set(vec![
            change("a.rs", FileStatus::Modified, 3, 1),
            change("b.rs", FileStatus::Modified, 0, 0),
        ]);
        let analysis = analyze_diff(&diff, true);
        assert_eq!(analysis.changes_summary, "2 file(s) changed (+3/-1)");
    }
}
