// src/results.rs

//! Per-path execution outcomes and their aggregate.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use crate::paths::ProjectPath;
use crate::timing::TimeTaken;

/// Exit code recorded for a path whose command could not be run at all
/// (spawn failure, crashed worker).
pub const SPAWN_FAILURE_EXIT_CODE: i32 = 99;

/// Outcome of running one command against one path.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    pub exit_code: i32,
    pub run_time: Duration,
    /// `None` when nothing ran for this result (see [`ExecutionResult::none`]).
    pub path: Option<ProjectPath>,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

impl ExecutionResult {
    pub fn new(exit_code: i32, run_time: Duration, path: ProjectPath) -> Self {
        Self {
            exit_code,
            run_time,
            path: Some(path),
            stdout: None,
            stderr: None,
        }
    }

    /// The canonical "no command applied" result: exit 0, no time, no path.
    pub fn none() -> Self {
        Self {
            exit_code: 0,
            run_time: Duration::ZERO,
            path: None,
            stdout: None,
            stderr: None,
        }
    }

    /// Result standing in for a path whose command never got to run.
    pub fn crashed(path: ProjectPath) -> Self {
        Self::new(SPAWN_FAILURE_EXIT_CODE, Duration::ZERO, path)
    }

    pub fn with_output(mut self, stdout: String, stderr: String) -> Self {
        self.stdout = Some(stdout);
        self.stderr = Some(stderr);
        self
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Append-only collection of [`ExecutionResult`]s.
///
/// `add` takes `&self` and serialises writers, so one instance can be fed
/// from several workers.
#[derive(Debug, Default)]
pub struct ExecutionResults {
    results: Mutex<Vec<ExecutionResult>>,
}

impl ExecutionResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, result: ExecutionResult) {
        self.lock().push(result);
    }

    /// True iff at least one result was added and all of them succeeded.
    /// Nothing having run is not a success.
    pub fn success(&self) -> bool {
        let results = self.lock();
        !results.is_empty() && results.iter().all(ExecutionResult::success)
    }

    /// Sum of all run times, including results without a path.
    pub fn run_time(&self) -> TimeTaken {
        self.lock()
            .iter()
            .map(|r| TimeTaken::from(r.run_time))
            .sum()
    }

    /// Paths of the results that have one, in insertion order.
    pub fn paths(&self) -> Vec<ProjectPath> {
        self.lock().iter().filter_map(|r| r.path.clone()).collect()
    }

    /// Snapshot of every result, in insertion order.
    pub fn results(&self) -> Vec<ExecutionResult> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ExecutionResult>> {
        // A push cannot leave the vector half-written, so a poisoned lock
        // still guards consistent data.
        self.results.lock().unwrap_or_else(|e| e.into_inner())
    }
}
