// src/lib.rs

pub mod cli;
pub mod command;
pub mod config;
pub mod diff;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod output;
pub mod paths;
pub mod results;
pub mod runner;
pub mod split;
pub mod timing;

use std::sync::Arc;

use tracing::{debug, info};

use crate::cli::{
    Action, CliArgs, CommandArgs, EXIT_FAILURE, EXIT_NO_SUCH_COMMAND, EXIT_SUCCESS,
};
use crate::config::{config_root_dir, find_config_file, load_and_validate};
use crate::diff::GitDiffer;
use crate::errors::{RadishError, Result};
use crate::exec::ShellExecutor;
use crate::output::Outputter;
use crate::runner::Runner;
use crate::split::{Split, SplitSpec, split};
use crate::timing::{TimeTaken, timed};

/// High-level entry point used by `main.rs`; returns the process exit code.
///
/// This wires together:
/// - config discovery and loading
/// - the output sink (stdout/stderr plus any `--tee` destinations)
/// - the shell executor and git differ
/// - the runner
pub async fn run(args: CliArgs) -> Result<i32> {
    let config_path = match &args.config {
        Some(path) => path.clone(),
        // Discovered relative to where radish was started.
        None => find_config_file(std::env::current_dir()?)?,
    };
    let cfg = load_and_validate(&config_path)?;

    let base_dir = args
        .base_dir
        .clone()
        .unwrap_or_else(|| config_root_dir(&config_path));
    let base_dir = crate::fs::absolutize(&base_dir);
    debug!(config = ?config_path, base_dir = ?base_dir, "resolved paths");

    let outputter = Arc::new(Outputter::stdio());
    for dest in &args.tee {
        outputter.info.add_destination(dest)?;
        outputter.error.add_destination(dest)?;
    }

    let executor = Arc::new(ShellExecutor::new(&base_dir, Arc::clone(&outputter)));
    let differ = Box::new(GitDiffer::new(&base_dir));
    let runner = Runner::new(cfg, executor, differ, outputter);

    match &args.action {
        Action::Command(cmd_args) => run_command(&runner, cmd_args).await,
    }
}

/// Run one `radish command ...` invocation against an assembled runner,
/// writing the report to the runner's outputter.
pub async fn run_command(runner: &Runner, args: &CommandArgs) -> Result<i32> {
    let out = runner.outputter();

    let command = match runner.find_command(&args.name) {
        Ok(command) => command,
        Err(RadishError::CommandNotFound { name, available }) => {
            out.error.write(&format!(
                "No command \"{}\" registered.\n\nAvailable commands:\n\t{}\n",
                name,
                available.join("\n\t")
            ));
            return Ok(EXIT_NO_SUCH_COMMAND);
        }
        Err(e) => return Err(e),
    };

    let spec = SplitSpec::parse(args.jobs.as_deref(), args.job.as_deref())?;
    let changed = runner.changed_projects(args.from.as_deref(), args.to.as_deref())?;

    let (paths, jobs) = if spec.splits > 1 && spec.index.is_none() {
        // No index: this agent runs every changed path, `splits` at a time.
        out.info.write(&format!(
            "Running command {} in parallel with {} processes\n\n",
            command.name(),
            spec.splits
        ));
        (changed, spec.splits)
    } else {
        let paths = match split(changed, spec) {
            Split::Whole(paths) | Split::Shard(paths) => paths,
            // Only produced without an index, handled above.
            Split::Shards(shards) => shards.into_iter().flatten().collect(),
        };
        if let Some(index) = spec.index.filter(|_| spec.splits > 1) {
            out.info.write(&format!(
                "Running command {} in parallel as job {}/{}\n\n",
                command.name(),
                index + 1,
                spec.splits
            ));
        }
        (paths, 1)
    };

    out.info.write("Changed paths:\n");
    for path in &paths {
        out.info.write(&format!("\t{}\n", path));
    }
    out.info.write("\n");

    let (results, actual_run_time) = timed(runner.run(command, &paths, jobs)).await;
    let results = results?;

    for result in results.results() {
        let Some(path) = &result.path else { continue };
        out.info.write(&format!(
            "{}: {} ({})\n",
            path,
            if result.success() { "Success" } else { "Failure" },
            TimeTaken::from(result.run_time)
        ));
    }
    out.info.write("\n");
    if jobs > 1 {
        out.info
            .write(&format!("Cumulative run time: {}\n", results.run_time()));
    }
    out.info.write(&format!("Finished in {}\n", actual_run_time));

    info!(
        command = command.name(),
        success = results.success(),
        "run complete"
    );

    Ok(if results.success() {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    })
}
