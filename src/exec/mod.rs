// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`backend`] defines the [`Executor`] trait the runner depends on.
//! - [`shell`] holds [`ShellExecutor`], which runs commands through the
//!   platform shell with `tokio::process::Command`.
//! - [`null`] holds [`NullExecutor`], a canned implementation for tests.

pub mod backend;
pub mod null;
pub mod shell;

pub use backend::{ExecFuture, Executor, working_dir};
pub use null::NullExecutor;
pub use shell::ShellExecutor;
