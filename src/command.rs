// src/command.rs

//! Named commands and per-path command resolution.

use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use tracing::trace;

use crate::errors::{RadishError, Result};
use crate::paths::ProjectPath;

/// Reserved mapping key used when no other key applies to a path.
pub const DEFAULT_KEY: &str = "default";

/// A named command: an ordered mapping of path pattern to shell command.
///
/// ```yaml
/// test:
///   default: python setup.py test
///   js/*/: npm test
///   extensions/rules/: py.test
/// ```
#[derive(Debug, Clone)]
pub struct Command {
    name: String,
    mapping: IndexMap<String, String>,
    /// Glob keys of `mapping`, compiled, in declared order.
    globs: Vec<ProjectPath>,
}

impl Command {
    pub fn new(name: impl Into<String>, mapping: IndexMap<String, String>) -> Result<Self> {
        let name = name.into();
        let mut globs = Vec::new();

        for key in mapping.keys() {
            if key == DEFAULT_KEY {
                continue;
            }
            let pattern = ProjectPath::new(key.as_str()).map_err(|e| {
                RadishError::Config(format!("command '{name}' has an invalid path key: {e}"))
            })?;
            if pattern.is_glob() {
                globs.push(pattern);
            }
        }

        Ok(Self {
            name,
            mapping,
            globs,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mapping(&self) -> &IndexMap<String, String> {
        &self.mapping
    }

    /// Resolve the shell command for `path`.
    ///
    /// First hit wins: an exact key, then glob keys in declared order, then
    /// the `default` key. `None` means nothing should run for this path.
    pub fn resolve(&self, path: &ProjectPath) -> Option<&str> {
        if let Some(cmd) = self.mapping.get(path.as_str()) {
            return Some(cmd);
        }

        if let Some(glob) = self.globs.iter().find(|g| g.matches(path.as_str())) {
            trace!(command = %self.name, %path, pattern = %glob, "resolved via glob key");
            return self.mapping.get(glob.as_str()).map(String::as_str);
        }

        self.mapping.get(DEFAULT_KEY).map(String::as_str)
    }

    /// All explicit `(pattern, command)` pairs: literal keys, then glob
    /// keys, then `default`.
    pub fn items(&self) -> Vec<(&str, &str)> {
        let literals = self
            .mapping
            .iter()
            .filter(|(k, _)| k.as_str() != DEFAULT_KEY && !self.is_glob_key(k));
        let globs = self
            .globs
            .iter()
            .filter_map(|g| self.mapping.get_key_value(g.as_str()));
        let default = self.mapping.get_key_value(DEFAULT_KEY);

        literals
            .chain(globs)
            .chain(default)
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    fn is_glob_key(&self, key: &str) -> bool {
        self.globs.iter().any(|g| g.as_str() == key)
    }

    /// `(path, resolved command)` for exactly the given paths, in order.
    pub fn items_for(&self, filter: &[ProjectPath]) -> Vec<(ProjectPath, Option<String>)> {
        filter
            .iter()
            .map(|path| (path.clone(), self.resolve(path).map(str::to_string)))
            .collect()
    }
}

impl PartialEq for Command {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.mapping == other.mapping
    }
}

impl Eq for Command {}

impl Hash for Command {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Equality ignores mapping order, so hash the entries sorted.
        self.name.hash(state);
        let mut entries: Vec<_> = self.mapping.iter().collect();
        entries.sort();
        entries.hash(state);
    }
}
