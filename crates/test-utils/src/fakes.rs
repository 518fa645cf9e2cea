use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use radish::diff::Differ;
use radish::errors::{RadishError, Result};
use radish::exec::{ExecFuture, Executor};
use radish::paths::ProjectPath;
use radish::results::ExecutionResult;

/// What a `ScriptedExecutor` does for one path.
#[derive(Debug, Clone)]
pub enum Script {
    /// Finish with this exit code after (simulated) `delay`.
    Exit { code: i32, delay: Duration },
    /// Fail as if the process could not be spawned.
    SpawnFailure,
}

/// A fake executor that:
/// - records which paths were "run", in start order
/// - tracks how many calls were in flight at once
/// - answers from a per-path script (default: immediate success).
#[derive(Debug, Default)]
pub struct ScriptedExecutor {
    scripts: HashMap<String, Script>,
    default_delay: Duration,
    executed: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    base_dir: PathBuf,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self {
            base_dir: PathBuf::from("/"),
            ..Self::default()
        }
    }

    pub fn script(mut self, path: &str, script: Script) -> Self {
        self.scripts.insert(path.to_string(), script);
        self
    }

    pub fn exit_code(self, path: &str, code: i32) -> Self {
        self.script(
            path,
            Script::Exit {
                code,
                delay: Duration::ZERO,
            },
        )
    }

    pub fn spawn_failure(self, path: &str) -> Self {
        self.script(path, Script::SpawnFailure)
    }

    /// Delay for paths without a script.
    pub fn default_delay(mut self, delay: Duration) -> Self {
        self.default_delay = delay;
        self
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }

    /// Highest number of calls that were running at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl Executor for ScriptedExecutor {
    fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn execute<'a>(&'a self, path: &'a ProjectPath, command: Option<&'a str>) -> ExecFuture<'a> {
        Box::pin(async move {
            if command.is_none() {
                return Ok(ExecutionResult::none());
            }

            self.executed.lock().unwrap().push(path.to_string());

            let (code, delay) = match self.scripts.get(path.as_str()) {
                Some(Script::SpawnFailure) => {
                    return Err(RadishError::Spawn {
                        path: path.to_string(),
                        source: io::Error::new(io::ErrorKind::NotFound, "no shell available"),
                    });
                }
                Some(Script::Exit { code, delay }) => (*code, *delay),
                None => (0, self.default_delay),
            };

            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(delay).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            Ok(ExecutionResult::new(code, delay, path.clone()))
        })
    }
}

/// A differ returning a fixed list of changed files for any revisions, or
/// failing like an unknown revision when built with `failing()`.
#[derive(Debug, Clone, Default)]
pub struct StaticDiffer {
    files: Vec<String>,
    fail: bool,
    calls: std::sync::Arc<Mutex<Vec<(String, Option<String>)>>>,
}

impl StaticDiffer {
    pub fn new(files: &[&str]) -> Self {
        Self {
            files: files.iter().map(|f| f.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// `(from, to)` of every call, shared between clones.
    pub fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Differ for StaticDiffer {
    fn changed_files_between(&self, from: &str, to: Option<&str>) -> Result<Vec<String>> {
        self.calls
            .lock()
            .unwrap()
            .push((from.to_string(), to.map(str::to_string)));

        if self.fail {
            return Err(RadishError::Diff {
                message: format!(
                    "Failed to get list of changed files between '{}' and '{}'",
                    from,
                    to.unwrap_or("HEAD")
                ),
                source: git2::Error::from_str("revspec not found"),
            });
        }
        Ok(self.files.clone())
    }
}
