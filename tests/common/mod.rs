// tests/common/mod.rs

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use git2::{IndexAddOption, Repository, Signature};
use tempfile::TempDir;

pub use radish_test_utils::builders;
pub use radish_test_utils::capture::{SharedBuffer, captured_outputter};
pub use radish_test_utils::fakes::{Script, ScriptedExecutor, StaticDiffer};
pub use radish_test_utils::{init_tracing, path, paths, with_timeout};

/// A throwaway git repository in a temporary directory.
pub struct GitFixture {
    pub dir: TempDir,
    pub repo: Repository,
}

impl GitFixture {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let repo = Repository::init(dir.path())?;
        Ok(Self { dir, repo })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` to `rel`, creating parent directories.
    pub fn write(&self, rel: &str, contents: &str) -> std::io::Result<()> {
        let full = self.dir.path().join(rel);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(full, contents)
    }

    /// Stage everything and commit it on HEAD; returns the commit id.
    pub fn commit_all(&self, message: &str) -> Result<String, git2::Error> {
        let mut index = self.repo.index()?;
        index.add_all(["*"], IndexAddOption::DEFAULT, None)?;
        index.update_all(["*"], None)?;
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let sig = Signature::now("radish", "radish@example.com")?;

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let id = self
            .repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)?;
        Ok(id.to_string())
    }
}
