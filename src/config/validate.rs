// src/config/validate.rs

use std::collections::HashSet;

use crate::command::Command;
use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{RadishError, Result};
use crate::paths::ProjectPath;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::RadishError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;

        let paths = build_paths(&raw.paths)?;
        let commands = raw
            .commands
            .into_iter()
            .map(|(name, mapping)| Command::new(name, mapping))
            .collect::<Result<Vec<_>>>()?;

        Ok(ConfigFile::new_unchecked(paths, commands))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_paths(cfg)?;
    validate_commands(cfg)?;
    Ok(())
}

fn validate_paths(cfg: &RawConfigFile) -> Result<()> {
    if let Some(pos) = cfg.paths.iter().position(|p| p.trim().is_empty()) {
        return Err(RadishError::Config(format!(
            "`paths` entry #{} is empty",
            pos + 1
        )));
    }
    Ok(())
}

fn validate_commands(cfg: &RawConfigFile) -> Result<()> {
    for (name, mapping) in cfg.commands.iter() {
        if name.trim().is_empty() {
            return Err(RadishError::Config(
                "command names must not be empty".to_string(),
            ));
        }
        if mapping.is_empty() {
            return Err(RadishError::Config(format!(
                "command '{}' does not map any path to a shell command",
                name
            )));
        }
        for (pattern, shell) in mapping.iter() {
            if shell.trim().is_empty() {
                return Err(RadishError::Config(format!(
                    "command '{}' has an empty shell command for '{}'",
                    name, pattern
                )));
            }
        }
    }
    Ok(())
}

/// Compile paths, keeping the first occurrence of duplicates (a glob and an
/// explicit entry often expand to the same directory).
fn build_paths(raw: &[String]) -> Result<Vec<ProjectPath>> {
    let mut seen = HashSet::new();
    let mut paths = Vec::with_capacity(raw.len());
    for p in raw {
        if seen.insert(p.as_str()) {
            paths.push(ProjectPath::new(p.as_str())?);
        }
    }
    Ok(paths)
}
