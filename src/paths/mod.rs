// src/paths/mod.rs

//! Project paths and change matching.
//!
//! - [`pattern`] defines [`ProjectPath`], a configured path that may be a
//!   glob pattern, and its directional matching rules.
//! - [`expand`] expands globbed config paths against the filesystem at load
//!   time.
//! - [`match_lines`] folds a list of changed files over the configured paths.

pub mod expand;
pub mod pattern;

use std::collections::BTreeSet;

pub use expand::expand_path;
pub use pattern::{ProjectPath, contains_glob};

/// Return the unique configured paths that any of `lines` falls under.
///
/// Glob paths contribute the concrete directories they matched, so
/// `"extensions/*/"` against changes in two extensions yields both
/// `"extensions/a/"` and `"extensions/b/"`. The set is ordered by path,
/// which keeps downstream sharding deterministic.
pub fn match_lines<S: AsRef<str>>(lines: &[S], paths: &[ProjectPath]) -> BTreeSet<ProjectPath> {
    lines
        .iter()
        .flat_map(|line| paths.iter().filter_map(move |path| path.match_line(line.as_ref())))
        .collect()
}
