// src/exec/backend.rs

//! Pluggable executor abstraction.
//!
//! The runner talks to an `Executor` trait object instead of spawning
//! processes itself. Production uses [`ShellExecutor`](super::ShellExecutor);
//! tests swap in [`NullExecutor`](super::NullExecutor) or their own fakes to
//! check orchestration without spawning anything.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use crate::errors::Result;
use crate::paths::ProjectPath;
use crate::results::ExecutionResult;

/// Boxed future returned by [`Executor::execute`].
pub type ExecFuture<'a> = Pin<Box<dyn Future<Output = Result<ExecutionResult>> + Send + 'a>>;

/// Runs one shell command for one path.
///
/// Implementations are shared between worker tasks, hence `Send + Sync`.
pub trait Executor: Send + Sync {
    /// Directory relative paths are resolved against.
    fn base_dir(&self) -> &Path;

    /// Run `command` for `path`.
    ///
    /// - `None` means no command applies: return
    ///   [`ExecutionResult::none`] without running anything.
    /// - A non-zero exit code is a normal `Ok` result.
    /// - `Err` is reserved for failing to run the command at all.
    fn execute<'a>(&'a self, path: &'a ProjectPath, command: Option<&'a str>) -> ExecFuture<'a>;
}

/// Working directory for `path`: used as is when absolute, otherwise joined
/// onto `base`.
pub fn working_dir(base: &Path, path: &ProjectPath) -> PathBuf {
    let p = Path::new(path.as_str());
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base.join(p)
    }
}
