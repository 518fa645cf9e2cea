// tests/git_differ.rs

mod common;
use crate::common::{GitFixture, init_tracing};

use std::error::Error;

use radish::diff::{Differ, GitDiffer};
use radish::errors::RadishError;

type TestResult = Result<(), Box<dyn Error>>;

fn sorted(mut v: Vec<String>) -> Vec<String> {
    v.sort();
    v
}

#[test]
fn lists_files_changed_between_commits() -> TestResult {
    init_tracing();

    let repo = GitFixture::new()?;
    repo.write("js/web/app.js", "v1")?;
    repo.write("extensions/rules/setup.py", "v1")?;
    let first = repo.commit_all("initial")?;

    repo.write("js/web/app.js", "v2")?;
    repo.write("extensions/auth/setup.py", "new")?;
    let second = repo.commit_all("second")?;

    let differ = GitDiffer::new(repo.root());
    let files = differ.changed_files_between(&first, Some(second.as_str()))?;

    assert_eq!(
        sorted(files),
        vec!["extensions/auth/setup.py", "js/web/app.js"]
    );
    Ok(())
}

#[test]
fn symbolic_refs_are_resolved() -> TestResult {
    let repo = GitFixture::new()?;
    repo.write("a/one.txt", "1")?;
    repo.commit_all("initial")?;
    repo.write("b/two.txt", "2")?;
    repo.commit_all("second")?;

    let differ = GitDiffer::new(repo.root());
    let files = differ.changed_files_between("HEAD~1", Some("HEAD"))?;
    assert_eq!(files, vec!["b/two.txt"]);
    Ok(())
}

#[test]
fn without_to_compares_against_the_working_tree() -> TestResult {
    let repo = GitFixture::new()?;
    repo.write("docs/index.md", "v1")?;
    repo.write("api/main.rs", "v1")?;
    repo.commit_all("initial")?;

    repo.write("api/main.rs", "edited, not committed")?;

    let differ = GitDiffer::new(repo.root());
    let files = differ.changed_files_between("HEAD", None)?;
    assert_eq!(files, vec!["api/main.rs"]);
    Ok(())
}

#[test]
fn deleted_files_are_reported() -> TestResult {
    let repo = GitFixture::new()?;
    repo.write("old/file.txt", "bye")?;
    repo.write("keep/file.txt", "stay")?;
    let first = repo.commit_all("initial")?;

    std::fs::remove_file(repo.root().join("old/file.txt"))?;
    let second = repo.commit_all("delete")?;

    let differ = GitDiffer::new(repo.root());
    assert_eq!(
        differ.changed_files_between(&first, Some(second.as_str()))?,
        vec!["old/file.txt"]
    );
    Ok(())
}

#[test]
fn unknown_revision_is_a_diff_error() -> TestResult {
    let repo = GitFixture::new()?;
    repo.write("a.txt", "a")?;
    repo.commit_all("initial")?;

    let differ = GitDiffer::new(repo.root());
    let err = differ
        .changed_files_between("does-not-exist", None)
        .unwrap_err();

    match err {
        RadishError::Diff { message, .. } => assert_eq!(
            message,
            "Failed to get list of changed files between 'does-not-exist' and 'HEAD'"
        ),
        other => panic!("expected diff error, got {other:?}"),
    }
    Ok(())
}

#[test]
fn not_a_repository_is_a_diff_error() -> TestResult {
    let dir = tempfile::tempdir()?;
    let differ = GitDiffer::new(dir.path());

    let err = differ.changed_files_between("HEAD~1", Some("HEAD")).unwrap_err();
    assert!(matches!(err, RadishError::Diff { .. }));
    assert!(err.to_string().contains("'HEAD~1' and 'HEAD'"));
    Ok(())
}

#[test]
fn identical_revisions_have_no_changes() -> TestResult {
    let repo = GitFixture::new()?;
    repo.write("a/file.txt", "same")?;
    let only = repo.commit_all("initial")?;

    let differ = GitDiffer::new(repo.root());
    assert!(differ.changed_files_between(&only, Some(only.as_str()))?.is_empty());
    assert!(differ.changed_files_between("HEAD", None)?.is_empty());
    Ok(())
}
