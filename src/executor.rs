//! Task execution driver
//!
//! Runs the selected tasks one after another or all at once. Serial runs stop
//! at the first failure. Parallel runs never cancel siblings: every task runs
//! to completion and the first failure in selection order is reported.

use std::time::{Duration, Instant};

use console::style;
use futures::future::join_all;

use crate::config::TaskSet;
use crate::error::{Result, RunAllError};
use crate::runner::TaskRunner;

/// Execution strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// One at a time, stop at the first failure
    #[default]
    Serial,
    /// All at once, report after every task has finished
    Parallel,
}

impl Mode {
    pub fn from_parallel(parallel: bool) -> Self {
        if parallel {
            Self::Parallel
        } else {
            Self::Serial
        }
    }
}

/// Result of executing a single task
#[derive(Debug)]
pub struct TaskResult {
    pub name: String,
    pub duration: Duration,
    pub outcome: Result<()>,
}

impl TaskResult {
    pub fn success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Task executor
pub struct Executor<R> {
    runner: R,
    mode: Mode,
}

impl<R: TaskRunner> Executor<R> {
    /// Create a new executor
    pub fn new(runner: R, mode: Mode) -> Self {
        Self { runner, mode }
    }

    /// Run `names` from `tasks`. Returns the per-task results on full success,
    /// otherwise the failure of the first failing task.
    pub async fn execute(&self, names: &[&str], tasks: &TaskSet) -> Result<Vec<TaskResult>> {
        for name in names {
            if tasks.get(name).is_none() {
                return Err(RunAllError::TaskNotFound {
                    name: name.to_string(),
                });
            }
        }

        let start = Instant::now();
        let results = match self.mode {
            Mode::Serial => self.execute_serial(names, tasks).await?,
            Mode::Parallel => self.execute_parallel(names, tasks).await?,
        };

        Self::print_summary(&results, start.elapsed());
        Ok(results)
    }

    async fn execute_serial(&self, names: &[&str], tasks: &TaskSet) -> Result<Vec<TaskResult>> {
        let mut results = Vec::with_capacity(names.len());

        for name in names {
            let result = self.execute_single_task(name, tasks).await;
            Self::print_task_result(&result);

            if let Err(e) = result.outcome {
                tracing::debug!(task = %result.name, "serial run aborted");
                return Err(e);
            }
            results.push(result);
        }

        Ok(results)
    }

    async fn execute_parallel(&self, names: &[&str], tasks: &TaskSet) -> Result<Vec<TaskResult>> {
        // join_all polls every task to completion; no sibling is dropped early
        let all = join_all(
            names
                .iter()
                .map(|name| self.execute_single_task(name, tasks)),
        )
        .await;

        let mut results = Vec::with_capacity(all.len());
        let mut first_failure = None;

        for mut result in all {
            Self::print_task_result(&result);

            if let Err(e) = std::mem::replace(&mut result.outcome, Ok(())) {
                first_failure.get_or_insert(e);
            } else {
                results.push(result);
            }
        }

        match first_failure {
            Some(e) => Err(e),
            None => Ok(results),
        }
    }

    /// Execute a single task
    async fn execute_single_task(&self, name: &str, tasks: &TaskSet) -> TaskResult {
        let start = Instant::now();

        let outcome = match tasks.get(name) {
            Some(task) => match self.runner.run_task(name, task).await {
                Ok(0) => Ok(()),
                Ok(code) => Err(RunAllError::TaskFailed {
                    task: name.to_string(),
                    code,
                }),
                Err(e) => Err(e),
            },
            None => Err(RunAllError::TaskNotFound {
                name: name.to_string(),
            }),
        };

        TaskResult {
            name: name.to_string(),
            duration: start.elapsed(),
            outcome,
        }
    }

    /// Print result of a single task
    fn print_task_result(result: &TaskResult) {
        let status = if result.success() {
            style("✓").green()
        } else {
            style("✗").red()
        };

        let duration = format!("{:.2}s", result.duration.as_secs_f64());

        println!(
            "{} {} {}",
            status,
            style(&result.name).bold(),
            style(duration).dim()
        );
    }

    /// Print execution summary
    fn print_summary(results: &[TaskResult], elapsed: Duration) {
        println!();
        println!(
            "{} All {} tasks completed successfully in {:.2}s",
            style("✓").green().bold(),
            results.len(),
            elapsed.as_secs_f64()
        );
    }
}
