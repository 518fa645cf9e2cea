// src/paths/pattern.rs

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use globset::{GlobBuilder, GlobMatcher};

use crate::errors::{RadishError, Result};

/// Check if a string is a glob pattern, i.e. contains a `*` wildcard.
///
/// `?` and `[` on their own are ordinary path characters, so a directory
/// such as `docs/[v1]/` stays a literal path.
pub fn contains_glob(s: &str) -> bool {
    s.contains('*')
}

/// A configured or observed project-relative path, possibly a glob pattern
/// such as `"extensions/*/"`.
///
/// Identity (`Eq`, `Hash`, `Ord`) is the raw string only. Whether a glob
/// pattern covers a concrete path is answered by [`ProjectPath::match_line`],
/// never by equality.
#[derive(Clone)]
pub struct ProjectPath {
    raw: String,
    glob: Option<GlobMatcher>,
}

impl ProjectPath {
    /// Build a path, compiling it as a glob when it contains metacharacters.
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let glob = if contains_glob(&raw) {
            Some(compile_dir_glob(&raw)?)
        } else {
            None
        };
        Ok(Self { raw, glob })
    }

    /// A path taken verbatim, even if it contains glob metacharacters.
    ///
    /// Used for concrete directories produced by expanding a pattern.
    pub(crate) fn literal(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            glob: None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_glob(&self) -> bool {
        self.glob.is_some()
    }

    /// Return the path `candidate` lies under, if any.
    ///
    /// - Plain paths use string-prefix semantics: `"extensions/rules/"`
    ///   matches `"extensions/rules/tests/x.py"` and returns itself.
    /// - Glob paths match the candidate's leading directory segments and
    ///   return the concrete directory: `"extensions/*/"` applied to
    ///   `"extensions/cool/src/a.py"` returns `"extensions/cool/"`. The
    ///   matched segments must be followed by a `/`, so a bare
    ///   `"extensions/cool"` does not match.
    pub fn match_line(&self, candidate: &str) -> Option<ProjectPath> {
        let Some(matcher) = &self.glob else {
            return candidate.starts_with(&self.raw).then(|| self.clone());
        };

        let depth = self.raw.trim_end_matches('/').split('/').count();
        let mut segments = candidate.splitn(depth + 1, '/');
        let head: Vec<&str> = segments.by_ref().take(depth).collect();

        // Need the trailing structure: at least one more segment (possibly
        // empty, as in "extensions/cool/").
        if head.len() < depth || segments.next().is_none() {
            return None;
        }

        let dir = head.join("/");
        if !matcher.is_match(&dir) {
            return None;
        }

        let concrete = if self.raw.ends_with('/') {
            format!("{dir}/")
        } else {
            dir
        };
        Some(ProjectPath::literal(concrete))
    }

    pub fn matches(&self, candidate: &str) -> bool {
        self.match_line(candidate).is_some()
    }
}

/// Compile the directory part of a pattern; `*` never crosses a `/`.
fn compile_dir_glob(raw: &str) -> Result<GlobMatcher> {
    let dir_pattern = raw.trim_end_matches('/');
    let glob = GlobBuilder::new(dir_pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| RadishError::InvalidGlob {
            pattern: raw.to_string(),
            source,
        })?;
    Ok(glob.compile_matcher())
}

impl PartialEq for ProjectPath {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for ProjectPath {}

impl PartialEq<str> for ProjectPath {
    fn eq(&self, other: &str) -> bool {
        self.raw == other
    }
}

impl PartialEq<&str> for ProjectPath {
    fn eq(&self, other: &&str) -> bool {
        self.raw == *other
    }
}

impl Hash for ProjectPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl PartialOrd for ProjectPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ProjectPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl fmt::Display for ProjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl fmt::Debug for ProjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ProjectPath").field(&self.raw).finish()
    }
}

impl std::str::FromStr for ProjectPath {
    type Err = RadishError;

    fn from_str(s: &str) -> Result<Self> {
        ProjectPath::new(s)
    }
}
