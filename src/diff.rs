// src/diff.rs

//! Version-control diff provider.
//!
//! The runner only needs "which files changed between these two
//! revisions"; [`Differ`] is that boundary and [`GitDiffer`] answers it with
//! `git2`.

use std::path::{Path, PathBuf};

use git2::{Diff, Repository};
use indexmap::IndexSet;
use tracing::debug;

use crate::errors::{RadishError, Result};
use crate::fs::absolutize;

/// Source of changed file paths between two revisions.
pub trait Differ: Send + Sync {
    /// Files changed between `from` and `to`, relative to the repository
    /// root. Without `to`, compares `from` with the working tree.
    fn changed_files_between(&self, from: &str, to: Option<&str>) -> Result<Vec<String>>;
}

/// Git implementation backed by `git2`.
#[derive(Debug, Clone)]
pub struct GitDiffer {
    base_path: PathBuf,
}

impl GitDiffer {
    /// `base_path` must be the repository root; relative paths are made
    /// absolute against the current directory.
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            base_path: absolutize(base_path.as_ref()),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn diff_names(&self, from: &str, to: Option<&str>) -> std::result::Result<Vec<String>, git2::Error> {
        let repo = Repository::open(&self.base_path)?;
        let from_tree = repo.revparse_single(from)?.peel_to_tree()?;

        let diff: Diff<'_> = match to {
            Some(to) => {
                let to_tree = repo.revparse_single(to)?.peel_to_tree()?;
                repo.diff_tree_to_tree(Some(&from_tree), Some(&to_tree), None)?
            }
            None => repo.diff_tree_to_workdir_with_index(Some(&from_tree), None)?,
        };

        let mut files = IndexSet::new();
        for delta in diff.deltas() {
            let path = delta.new_file().path().or_else(|| delta.old_file().path());
            if let Some(path) = path {
                files.insert(path.to_string_lossy().replace('\\', "/"));
            }
        }

        Ok(files.into_iter().collect())
    }
}

impl Differ for GitDiffer {
    fn changed_files_between(&self, from: &str, to: Option<&str>) -> Result<Vec<String>> {
        let files = self
            .diff_names(from, to)
            .map_err(|source| RadishError::Diff {
                message: format!(
                    "Failed to get list of changed files between '{}' and '{}'",
                    from,
                    to.unwrap_or("HEAD")
                ),
                source,
            })?;

        debug!(from, to = to.unwrap_or("<worktree>"), count = files.len(), "computed changed files");
        Ok(files)
    }
}
