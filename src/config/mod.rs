// src/config/mod.rs

//! Configuration loading and validation for radish.
//!
//! Responsibilities:
//! - Define the YAML/TOML-backed data model (`model.rs`).
//! - Find and load a config file from disk, expanding globbed paths
//!   (`loader.rs`).
//! - Validate paths and command mappings (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{
    CONFIG_FILE_NAMES, config_root_dir, find_config_file, load_and_validate, load_from_path,
};
pub use model::{ConfigFile, RawConfigFile};
