// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Every command succeeded.
pub const EXIT_SUCCESS: i32 = 0;
/// A fatal error (config, diff, invalid arguments) stopped the run.
pub const EXIT_ERROR: i32 = 1;
/// The requested command is not configured.
pub const EXIT_NO_SUCH_COMMAND: i32 = 2;
/// At least one command failed, or nothing ran.
pub const EXIT_FAILURE: i32 = 10;

/// Command-line arguments for `radish`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "radish",
    version,
    about = "A task runner that understands version control.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (YAML, or TOML when it ends in `.toml`).
    ///
    /// If omitted, the first of `Radishfile`, `Radishfile.yml`,
    /// `Radishfile.yaml`, `Radishfile.toml` in the current directory is used.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory commands run relative to, and the git repository root.
    ///
    /// Default: the directory containing the config file.
    #[arg(long, global = true, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `RADISH_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Also write all output to this destination (a file path, `stdout` or
    /// `stderr`). May be repeated.
    #[arg(long, global = true, value_name = "DEST")]
    pub tee: Vec<String>,

    #[command(subcommand)]
    pub action: Action,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Action {
    /// Run a configured command for every changed path.
    Command(CommandArgs),
}

#[derive(Debug, Clone, clap::Args)]
pub struct CommandArgs {
    /// Name of the command to run, as configured under `commands:`.
    pub name: String,

    /// The commit or reference to compare from.
    ///
    /// Without it, every configured path is considered changed.
    #[arg(long = "from", value_name = "REF")]
    pub from: Option<String>,

    /// The commit or reference to compare to (default: the working tree).
    #[arg(long = "to", value_name = "REF", requires = "from")]
    pub to: Option<String>,

    /// The number of parallel jobs to run.
    ///
    /// Alone, runs that many commands at once. With `--job`, the number of
    /// CI agents the changed paths are split across.
    #[arg(short = 'j', long, value_name = "JOBS")]
    pub jobs: Option<String>,

    /// The index of the current job (0-indexed); consistently maps paths to
    /// this index.
    #[arg(short = 'J', long, value_name = "JOB_INDEX", requires = "jobs")]
    pub job: Option<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
