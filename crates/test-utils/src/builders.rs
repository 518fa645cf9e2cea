use indexmap::IndexMap;
use radish::command::Command;
use radish::config::{ConfigFile, RawConfigFile};

/// Builder for `ConfigFile` to simplify test setup.
///
/// Paths are taken verbatim (no filesystem glob expansion).
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn with_path(mut self, path: &str) -> Self {
        self.config.paths.push(path.to_string());
        self
    }

    pub fn with_paths(mut self, paths: &[&str]) -> Self {
        self.config
            .paths
            .extend(paths.iter().map(|p| p.to_string()));
        self
    }

    /// Add a command from `(pattern, shell command)` pairs, in order.
    pub fn with_command(mut self, name: &str, mapping: &[(&str, &str)]) -> Self {
        self.config
            .commands
            .insert(name.to_string(), mapping_of(mapping));
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// An ordered mapping from `(key, value)` pairs.
pub fn mapping_of(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// A `Command` built from `(pattern, shell command)` pairs.
pub fn command(name: &str, pairs: &[(&str, &str)]) -> Command {
    Command::new(name, mapping_of(pairs)).expect("valid test command")
}
