// src/config/model.rs

use indexmap::IndexMap;
use serde::Deserialize;

use crate::command::Command;
use crate::paths::ProjectPath;

/// Raw configuration as read from a `Radishfile`.
///
/// ```yaml
/// paths:
///   - extensions/*/
///   - js/mobile/
/// commands:
///   test:
///     default: python setup.py test
///     js/*/: npm test
/// ```
///
/// Command mappings keep their declared order, which decides which glob key
/// wins when several could apply.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    /// Project paths, possibly globs expanded at load time.
    pub paths: Vec<String>,

    /// Command name -> (path pattern -> shell command).
    #[serde(default)]
    pub commands: IndexMap<String, IndexMap<String, String>>,
}

/// Validated configuration.
///
/// Constructed via `TryFrom<RawConfigFile>` (see `validate.rs`), so every
/// path and command pattern has already been compiled.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    paths: Vec<ProjectPath>,
    commands: Vec<Command>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(paths: Vec<ProjectPath>, commands: Vec<Command>) -> Self {
        Self { paths, commands }
    }

    /// Configured project paths, in configuration order.
    pub fn paths(&self) -> &[ProjectPath] {
        &self.paths
    }

    /// Configured commands, in configuration order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Look up a command by exact name.
    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name() == name)
    }

    pub fn command_names(&self) -> Vec<String> {
        self.commands.iter().map(|c| c.name().to_string()).collect()
    }
}
