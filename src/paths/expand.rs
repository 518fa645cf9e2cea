// src/paths/expand.rs

//! Load-time expansion of globbed config paths.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};
use tracing::{debug, warn};

use crate::errors::{RadishError, Result};
use crate::fs::FileSystem;
use crate::paths::pattern::{ProjectPath, contains_glob};

/// Expand a configured path against the filesystem rooted at `base`.
///
/// - A plain path is returned unchanged (it does not need to exist).
/// - A glob is expanded one segment at a time, shell style: hidden entries
///   are skipped unless the segment itself starts with `.`, and a pattern
///   ending in `/` only yields directories.
///
/// Results are sorted so that the configured path order is stable across
/// machines.
pub fn expand_path(fs: &dyn FileSystem, base: &Path, raw: &str) -> Result<Vec<ProjectPath>> {
    if !contains_glob(raw) {
        return Ok(vec![ProjectPath::new(raw)?]);
    }

    let dirs_only = raw.ends_with('/');
    let (root_rel, root) = if raw.starts_with('/') {
        ("/".to_string(), PathBuf::from("/"))
    } else {
        (String::new(), base.to_path_buf())
    };

    let mut frontier: Vec<(String, PathBuf)> = vec![(root_rel, root)];

    for segment in raw.split('/').filter(|s| !s.is_empty()) {
        let mut next = Vec::new();

        if contains_glob(segment) {
            let matcher = segment_matcher(raw, segment)?;
            for (rel, dir) in frontier {
                if !fs.is_dir(&dir) {
                    continue;
                }
                for entry in fs.read_dir(&dir)? {
                    let Some(name) = entry.file_name().and_then(|n| n.to_str()) else {
                        continue;
                    };
                    if name.starts_with('.') && !segment.starts_with('.') {
                        continue;
                    }
                    if matcher.is_match(name) {
                        next.push((join_rel(&rel, name), entry.clone()));
                    }
                }
            }
        } else {
            for (rel, dir) in frontier {
                let candidate = dir.join(segment);
                if fs.exists(&candidate) {
                    next.push((join_rel(&rel, segment), candidate));
                }
            }
        }

        frontier = next;
    }

    let mut expanded: Vec<String> = frontier
        .into_iter()
        .filter(|(_, full)| !dirs_only || fs.is_dir(full))
        .map(|(rel, _)| if dirs_only { format!("{rel}/") } else { rel })
        .collect();
    expanded.sort();
    expanded.dedup();

    if expanded.is_empty() {
        warn!(pattern = raw, base = ?base, "configured path glob matched nothing");
    } else {
        debug!(pattern = raw, ?expanded, "expanded configured path glob");
    }

    Ok(expanded.into_iter().map(ProjectPath::literal).collect())
}

fn segment_matcher(raw: &str, segment: &str) -> Result<GlobMatcher> {
    let glob = Glob::new(segment).map_err(|source| RadishError::InvalidGlob {
        pattern: raw.to_string(),
        source,
    })?;
    Ok(glob.compile_matcher())
}

fn join_rel(rel: &str, name: &str) -> String {
    if rel.is_empty() || rel.ends_with('/') {
        format!("{rel}{name}")
    } else {
        format!("{rel}/{name}")
    }
}
