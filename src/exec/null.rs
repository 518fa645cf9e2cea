// src/exec/null.rs

//! An executor that never spawns anything.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::fs::absolutize;
use crate::output::Outputter;
use crate::paths::ProjectPath;
use crate::results::ExecutionResult;

use super::backend::{ExecFuture, Executor};

/// Canned executor for exercising orchestration without processes.
///
/// Every call with a command writes `output` to the info channel and
/// returns `exit_code` / `run_time` for the real path. Calls are recorded
/// and can be inspected with [`NullExecutor::executed`].
#[derive(Debug)]
pub struct NullExecutor {
    exit_code: i32,
    run_time: Duration,
    output: String,
    base_dir: PathBuf,
    outputter: Arc<Outputter>,
    executed: Mutex<Vec<(ProjectPath, String)>>,
}

impl NullExecutor {
    pub fn new(exit_code: i32, outputter: Arc<Outputter>) -> Self {
        Self {
            exit_code,
            run_time: Duration::ZERO,
            output: String::new(),
            base_dir: absolutize(Path::new(".")),
            outputter,
            executed: Mutex::new(Vec::new()),
        }
    }

    pub fn with_run_time(mut self, run_time: Duration) -> Self {
        self.run_time = run_time;
        self
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_base_dir(mut self, base_dir: impl AsRef<Path>) -> Self {
        self.base_dir = absolutize(base_dir.as_ref());
        self
    }

    /// Every `(path, command)` this executor was asked to run.
    pub fn executed(&self) -> Vec<(ProjectPath, String)> {
        self.executed
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Executor for NullExecutor {
    fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn execute<'a>(&'a self, path: &'a ProjectPath, command: Option<&'a str>) -> ExecFuture<'a> {
        Box::pin(async move {
            let Some(command) = command else {
                return Ok(ExecutionResult::none());
            };

            self.executed
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push((path.clone(), command.to_string()));

            self.outputter.info.write(&self.output);
            Ok(ExecutionResult::new(self.exit_code, self.run_time, path.clone()))
        })
    }
}
