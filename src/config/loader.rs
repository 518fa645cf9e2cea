// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{RadishError, Result};
use crate::fs::{FileSystem, RealFileSystem};
use crate::paths::expand_path;

/// File names looked up, in order, when no config path is given.
pub const CONFIG_FILE_NAMES: [&str; 4] = [
    "Radishfile",
    "Radishfile.yml",
    "Radishfile.yaml",
    "Radishfile.toml",
];

/// Load a configuration file from a given path and return the raw
/// `RawConfigFile`.
///
/// Files ending in `.toml` are parsed as TOML, everything else as YAML.
/// This only deserializes; globbed paths are left as written. Use
/// [`load_and_validate`] for the full pipeline.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let config: RawConfigFile = if is_toml {
        toml::from_str(&contents)?
    } else {
        serde_yaml::from_str(&contents)?
    };

    Ok(config)
}

impl RawConfigFile {
    /// Replace globbed `paths` entries with the directories they match
    /// under `base`.
    pub fn expand_paths(mut self, fs: &dyn FileSystem, base: &Path) -> Result<Self> {
        let mut expanded = Vec::with_capacity(self.paths.len());
        for raw in &self.paths {
            for path in expand_path(fs, base, raw)? {
                expanded.push(path.as_str().to_string());
            }
        }
        self.paths = expanded;
        Ok(self)
    }
}

/// Load a configuration file from path, expand globbed paths relative to
/// the file's directory, and validate it.
///
/// This is the recommended entry point for the rest of the application.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let raw_config = load_from_path(path)?;
    let base = config_root_dir(path);
    debug!(config = ?path, base = ?base, "loaded config");

    let raw_config = raw_config.expand_paths(&RealFileSystem, &base)?;
    ConfigFile::try_from(raw_config)
}

/// Find the first of [`CONFIG_FILE_NAMES`] present in `dir`.
pub fn find_config_file(dir: impl AsRef<Path>) -> Result<PathBuf> {
    let dir = dir.as_ref();
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| {
            RadishError::Config(format!(
                "No file \"{}\" found in {:?}",
                CONFIG_FILE_NAMES.join(", "),
                dir
            ))
        })
}

/// Directory a config file's relative paths are resolved against.
///
/// - If the config path has a non-empty parent (e.g. "ci/Radishfile"), we
///   use that directory.
/// - If it's just a bare filename like "Radishfile" (parent = ""), we fall
///   back to the current working directory.
pub fn config_root_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}
