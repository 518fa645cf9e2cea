// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RadishError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid glob pattern \"{pattern}\": {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// The version-control diff failed; `source` is the underlying git error.
    #[error("{message}")]
    Diff {
        message: String,
        #[source]
        source: git2::Error,
    },

    #[error("No command \"{name}\" registered")]
    CommandNotFound { name: String, available: Vec<String> },

    #[error("Invalid output stream: {0}")]
    InvalidStream(String),

    #[error("Invalid split: {0}")]
    InvalidSplit(String),

    #[error("failed to run command for path \"{path}\": {source}")]
    Spawn {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, RadishError>;
