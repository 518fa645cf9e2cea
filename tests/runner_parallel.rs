// tests/runner_parallel.rs

mod common;
use crate::common::builders::ConfigFileBuilder;
use crate::common::{
    ScriptedExecutor, StaticDiffer, captured_outputter, init_tracing, path, paths, with_timeout,
};

use std::collections::HashSet;
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use radish::config::ConfigFile;
use radish::results::SPAWN_FAILURE_EXIT_CODE;
use radish::runner::Runner;

type TestResult = Result<(), Box<dyn Error>>;

fn config() -> ConfigFile {
    ConfigFileBuilder::new()
        .with_paths(&["a/", "b/", "c/", "d/", "e/"])
        .with_command("test", &[("default", "make test")])
        .build()
}

#[tokio::test]
async fn spawn_failure_is_attributed_to_its_path() -> TestResult {
    with_timeout(async {
        init_tracing();

        let (out, _, error) = captured_outputter();
        let exec = Arc::new(ScriptedExecutor::new().spawn_failure("b/"));
        let runner = Runner::new(config(), exec, Box::new(StaticDiffer::default()), out);

        let results = runner.run_named("test", &paths(&["a/", "b/", "c/"]), 3).await?;

        assert_eq!(results.len(), 3);
        assert!(!results.success());

        let crashed: Vec<_> = results
            .results()
            .into_iter()
            .filter(|r| r.exit_code == SPAWN_FAILURE_EXIT_CODE)
            .collect();
        assert_eq!(crashed.len(), 1);
        assert_eq!(crashed[0].path, Some(path("b/")));

        assert!(error.contents().contains("Command for path \"b/\" failed to run"));
        Ok(())
    })
    .await
}

#[tokio::test]
async fn concurrency_is_bounded_by_jobs() -> TestResult {
    with_timeout(async {
        let (out, _, _) = captured_outputter();
        let exec = Arc::new(ScriptedExecutor::new().default_delay(Duration::from_millis(30)));
        let runner = Runner::new(config(), exec.clone(), Box::new(StaticDiffer::default()), out);

        let all = paths(&["a/", "b/", "c/", "d/", "e/"]);
        let results = runner.run_named("test", &all, 2).await?;

        assert!(results.success());
        assert_eq!(results.len(), 5);
        assert_eq!(exec.peak_in_flight(), 2);

        let ran: HashSet<_> = results.paths().into_iter().collect();
        assert_eq!(ran, all.into_iter().collect());
        Ok(())
    })
    .await
}

#[tokio::test]
async fn results_arrive_in_completion_order() -> TestResult {
    with_timeout(async {
        let (out, info, _) = captured_outputter();
        let exec = Arc::new(
            ScriptedExecutor::new()
                .script(
                    "a/",
                    crate::common::Script::Exit {
                        code: 0,
                        delay: Duration::from_millis(80),
                    },
                )
                .script(
                    "b/",
                    crate::common::Script::Exit {
                        code: 4,
                        delay: Duration::from_millis(5),
                    },
                ),
        );
        let runner = Runner::new(config(), exec, Box::new(StaticDiffer::default()), out);

        let results = runner.run_named("test", &paths(&["a/", "b/"]), 2).await?;

        assert_eq!(results.paths(), paths(&["b/", "a/"]));
        assert!(!results.success());
        // Announcements are written up front, in submission order.
        assert_eq!(
            info.contents(),
            "Running test for a/:\n\nRunning test for b/:\n\n"
        );
        Ok(())
    })
    .await
}

#[tokio::test]
async fn parallel_run_with_nothing_to_do_is_empty() -> TestResult {
    with_timeout(async {
        let (out, _, _) = captured_outputter();
        let runner = Runner::new(
            config(),
            Arc::new(ScriptedExecutor::new()),
            Box::new(StaticDiffer::default()),
            out,
        );

        let results = runner.run_named("test", &[], 4).await?;
        assert!(results.is_empty());
        Ok(())
    })
    .await
}
