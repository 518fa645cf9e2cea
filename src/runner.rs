// src/runner.rs

//! Orchestration: changed files -> affected paths -> commands -> results.
//!
//! The [`Runner`] owns no process logic of its own. It asks the injected
//! [`Differ`] what changed, matches that against the configured paths,
//! resolves a shell command per path through [`Command`], and hands each one
//! to the injected [`Executor`], either one at a time or through a bounded
//! pool of tokio tasks.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::command::Command;
use crate::config::ConfigFile;
use crate::diff::Differ;
use crate::errors::{RadishError, Result};
use crate::exec::Executor;
use crate::output::Outputter;
use crate::paths::{ProjectPath, match_lines};
use crate::results::{ExecutionResult, ExecutionResults};

/// What running one path reports back.
///
/// Workers never fail: a command that could not be run is reported as
/// `Crashed`, so the collector can attribute it without error handling.
#[derive(Debug)]
pub enum TaskOutcome {
    Completed(ExecutionResult),
    Crashed { path: ProjectPath, error: String },
}

pub struct Runner {
    config: ConfigFile,
    executor: Arc<dyn Executor>,
    differ: Box<dyn Differ>,
    outputter: Arc<Outputter>,
}

impl fmt::Debug for Runner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runner")
            .field("config", &self.config)
            .field("base_dir", &self.executor.base_dir())
            .finish_non_exhaustive()
    }
}

impl Runner {
    pub fn new(
        config: ConfigFile,
        executor: Arc<dyn Executor>,
        differ: Box<dyn Differ>,
        outputter: Arc<Outputter>,
    ) -> Self {
        Self {
            config,
            executor,
            differ,
            outputter,
        }
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    pub fn outputter(&self) -> &Arc<Outputter> {
        &self.outputter
    }

    /// Look up a configured command by exact name.
    pub fn find_command(&self, name: &str) -> Result<&Command> {
        self.config
            .command(name)
            .ok_or_else(|| RadishError::CommandNotFound {
                name: name.to_string(),
                available: self.config.command_names(),
            })
    }

    /// Configured paths affected by the changes between `from` and `to`.
    ///
    /// Without `from` every configured path counts as changed. The result is
    /// sorted and free of duplicates, so every CI agent sees the same order.
    pub fn changed_projects(&self, from: Option<&str>, to: Option<&str>) -> Result<Vec<ProjectPath>> {
        let Some(from) = from else {
            let mut all = self.config.paths().to_vec();
            all.sort();
            all.dedup();
            return Ok(all);
        };

        let lines = self.differ.changed_files_between(from, to)?;
        let matched = match_lines(&lines, self.config.paths());
        info!(
            from,
            changed_files = lines.len(),
            matched = matched.len(),
            "matched changed files to configured paths"
        );
        Ok(matched.into_iter().collect())
    }

    /// [`find_command`](Self::find_command) followed by [`run`](Self::run).
    pub async fn run_named(
        &self,
        name: &str,
        paths: &[ProjectPath],
        jobs: usize,
    ) -> Result<ExecutionResults> {
        let command = self.find_command(name)?;
        self.run(command, paths, jobs).await
    }

    /// Run `command` for every path that resolves to a shell command.
    ///
    /// - `jobs <= 1`: one after the other, in `paths` order.
    /// - `jobs > 1`: at most `jobs` at a time; results arrive in completion
    ///   order.
    ///
    /// Either way a command that cannot be spawned is recorded as a crashed
    /// result for its path and the run carries on.
    ///
    /// Paths with no applicable command produce no result.
    pub async fn run(
        &self,
        command: &Command,
        paths: &[ProjectPath],
        jobs: usize,
    ) -> Result<ExecutionResults> {
        let scheduled: Vec<(ProjectPath, String)> = command
            .items_for(paths)
            .into_iter()
            .filter_map(|(path, cmd)| match cmd {
                Some(cmd) => Some((path, cmd)),
                None => {
                    debug!(command = command.name(), %path, "no command for path; skipping");
                    None
                }
            })
            .collect();

        info!(
            command = command.name(),
            scheduled = scheduled.len(),
            jobs,
            "running command"
        );

        let results = ExecutionResults::new();
        if jobs <= 1 {
            self.run_sequential(command, scheduled, &results).await;
        } else {
            self.run_parallel(command, scheduled, jobs, &results).await;
        }

        info!(
            command = command.name(),
            success = results.success(),
            "command finished"
        );
        Ok(results)
    }

    async fn run_sequential(
        &self,
        command: &Command,
        scheduled: Vec<(ProjectPath, String)>,
        results: &ExecutionResults,
    ) {
        for (path, cmd) in scheduled {
            self.announce(command, &path);
            let executed = self.executor.execute(&path, Some(&cmd)).await;
            let outcome = match executed {
                Ok(result) => TaskOutcome::Completed(result),
                Err(e) => TaskOutcome::Crashed {
                    path,
                    error: e.to_string(),
                },
            };
            results.add(self.collect(outcome));
            self.outputter.info.write("\n");
        }
    }

    async fn run_parallel(
        &self,
        command: &Command,
        scheduled: Vec<(ProjectPath, String)>,
        jobs: usize,
        results: &ExecutionResults,
    ) {
        let permits = Arc::new(Semaphore::new(jobs));
        let mut workers = JoinSet::new();
        let mut origins = HashMap::new();

        for (path, cmd) in scheduled {
            self.announce(command, &path);
            self.outputter.info.write("\n");

            let executor = Arc::clone(&self.executor);
            let permits = Arc::clone(&permits);
            let task_path = path.clone();

            let handle = workers.spawn(async move {
                let _permit = match permits.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => {
                        return TaskOutcome::Crashed {
                            path: task_path,
                            error: e.to_string(),
                        };
                    }
                };

                let executed = executor.execute(&task_path, Some(&cmd)).await;
                match executed {
                    Ok(result) => TaskOutcome::Completed(result),
                    Err(e) => TaskOutcome::Crashed {
                        path: task_path,
                        error: e.to_string(),
                    },
                }
            });
            origins.insert(handle.id(), path);
        }

        while let Some(joined) = workers.join_next_with_id().await {
            let outcome = match joined {
                Ok((id, outcome)) => {
                    origins.remove(&id);
                    outcome
                }
                // A worker that panicked still has to be attributed to its path.
                Err(join_err) => match origins.remove(&join_err.id()) {
                    Some(path) => TaskOutcome::Crashed {
                        path,
                        error: join_err.to_string(),
                    },
                    None => {
                        warn!(error = %join_err, "lost track of a crashed worker");
                        continue;
                    }
                },
            };
            results.add(self.collect(outcome));
        }
    }

    fn collect(&self, outcome: TaskOutcome) -> ExecutionResult {
        match outcome {
            TaskOutcome::Completed(result) => result,
            TaskOutcome::Crashed { path, error } => {
                warn!(%path, %error, "command could not be run");
                self.outputter.error.write(&format!(
                    "Command for path \"{}\" failed to run: {}\n",
                    path, error
                ));
                ExecutionResult::crashed(path)
            }
        }
    }

    fn announce(&self, command: &Command, path: &ProjectPath) {
        self.outputter
            .info
            .write(&format!("Running {} for {}:\n", command.name(), path));
    }
}
