// src/exec/shell.rs

//! Runs commands as shell child processes.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::{RadishError, Result};
use crate::fs::absolutize;
use crate::output::Outputter;
use crate::paths::ProjectPath;
use crate::results::ExecutionResult;
use crate::timing::timed;

use super::backend::{ExecFuture, Executor, working_dir};

/// Production executor: `sh -c <command>` (`cmd /C` on Windows) in the
/// path's directory, with stdout/stderr captured and forwarded to the
/// outputter once the process exits.
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    base_dir: PathBuf,
    outputter: Arc<Outputter>,
}

impl ShellExecutor {
    pub fn new(base_dir: impl AsRef<Path>, outputter: Arc<Outputter>) -> Self {
        Self {
            base_dir: absolutize(base_dir.as_ref()),
            outputter,
        }
    }

    async fn run(&self, path: &ProjectPath, command: &str) -> Result<ExecutionResult> {
        let cwd = working_dir(&self.base_dir, path);
        debug!(%path, cwd = ?cwd, cmd = command, "starting process");

        // Build a shell command appropriate for the platform.
        let mut cmd = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(command);
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c").arg(command);
            c
        };

        cmd.current_dir(&cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let spawn_error = |source: std::io::Error| RadishError::Spawn {
            path: path.to_string(),
            source,
        };

        let (output, run_time) = timed(async {
            let child = cmd.spawn().map_err(spawn_error)?;
            child.wait_with_output().await.map_err(spawn_error)
        })
        .await;
        let output = output?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !stdout.is_empty() {
            self.outputter.info.write(&stdout);
        }
        if !stderr.is_empty() {
            self.outputter.error.write(&stderr);
        }

        // Killed by a signal: no exit code.
        let exit_code = output.status.code().unwrap_or(-1);

        info!(
            %path,
            exit_code,
            success = output.status.success(),
            run_time_secs = run_time.as_secs_f64(),
            "process exited"
        );

        Ok(ExecutionResult::new(exit_code, run_time.as_duration(), path.clone())
            .with_output(stdout, stderr))
    }
}

impl Executor for ShellExecutor {
    fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn execute<'a>(&'a self, path: &'a ProjectPath, command: Option<&'a str>) -> ExecFuture<'a> {
        Box::pin(async move {
            match command {
                None => Ok(ExecutionResult::none()),
                Some(command) => self.run(path, command).await,
            }
        })
    }
}
