//! Running a single task as a child process
//!
//! By default a task is handed to `deno task <name>` so Deno resolves the
//! command. Shell mode runs the declared command string directly.

use std::path::PathBuf;
use std::process::Stdio;

use console::style;
use tokio::process::Command;

use crate::config::TaskDef;
use crate::error::{Result, RunAllError};

/// Program tasks are delegated to by default
pub const DENO: &str = "deno";

/// Something that can run one task to completion and report its exit code
#[allow(async_fn_in_trait)]
pub trait TaskRunner {
    /// Run `name` and return the exit code of the child
    async fn run_task(&self, name: &str, task: &TaskDef) -> Result<i32>;
}

/// How a task's child process is built
#[derive(Debug, Clone)]
pub enum Strategy {
    /// `<program> task --config <config> <name>`
    Delegate { program: PathBuf, config: PathBuf },
    /// `sh -c <command>` (`cmd /C` on Windows)
    Shell,
}

/// Runs tasks as child processes with inherited stdout and stderr
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    strategy: Strategy,
    cwd: PathBuf,
}

impl ProcessRunner {
    /// Delegate to `deno task`, resolving `deno` on PATH up front.
    ///
    /// `config` is passed through so deno runs the tasks from the same file
    /// they were selected from.
    pub fn delegate(cwd: impl Into<PathBuf>, config: impl Into<PathBuf>) -> Result<Self> {
        Self::delegate_to(DENO, cwd, config)
    }

    /// Delegate to `<program> task`, resolving `program` on PATH up front
    pub fn delegate_to(
        program: &str,
        cwd: impl Into<PathBuf>,
        config: impl Into<PathBuf>,
    ) -> Result<Self> {
        let program = which::which(program).map_err(|_| RunAllError::CommandNotFound {
            command: program.to_string(),
        })?;
        let config = config.into();
        tracing::debug!(
            program = %program.display(),
            config = %config.display(),
            "delegating tasks"
        );

        Ok(Self {
            strategy: Strategy::Delegate { program, config },
            cwd: cwd.into(),
        })
    }

    /// Run each task's command string through the shell
    pub fn shell(cwd: impl Into<PathBuf>) -> Self {
        Self {
            strategy: Strategy::Shell,
            cwd: cwd.into(),
        }
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    fn command(&self, name: &str, task: &TaskDef) -> Command {
        match &self.strategy {
            Strategy::Delegate { program, config } => {
                let mut c = Command::new(program);
                c.arg("task").arg("--config").arg(config).arg(name);
                c
            }
            Strategy::Shell => {
                let shell = if cfg!(windows) { "cmd" } else { "sh" };
                let flag = if cfg!(windows) { "/C" } else { "-c" };
                let mut c = Command::new(shell);
                c.arg(flag).arg(&task.command);
                c
            }
        }
    }
}

impl TaskRunner for ProcessRunner {
    async fn run_task(&self, name: &str, task: &TaskDef) -> Result<i32> {
        println!("Running task: {}", style(name).cyan().bold());

        let mut command = self.command(name, task);
        command
            .current_dir(&self.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        tracing::debug!(task = name, command = ?command.as_std(), "spawning");

        let status = command.status().await.map_err(|source| RunAllError::Spawn {
            task: name.to_string(),
            source,
        })?;

        // Killed by a signal: no code, still a failure
        Ok(status.code().unwrap_or(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_delegate_program() {
        let result =
            ProcessRunner::delegate_to("definitely-not-a-real-program-xyz", ".", "deno.json");
        assert!(matches!(
            result,
            Err(RunAllError::CommandNotFound { command }) if command == "definitely-not-a-real-program-xyz"
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_shell_exit_codes() {
        let runner = ProcessRunner::shell(".");

        let ok = runner.run_task("ok", &TaskDef::from("true")).await.unwrap();
        assert_eq!(ok, 0);

        let failed = runner
            .run_task("fail", &TaskDef::from("exit 3"))
            .await
            .unwrap();
        assert_eq!(failed, 3);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_shell_runs_in_cwd() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ProcessRunner::shell(dir.path());

        let code = runner
            .run_task("touch", &TaskDef::from("touch marker"))
            .await
            .unwrap();
        assert_eq!(code, 0);
        assert!(dir.path().join("marker").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_delegate_passes_config_and_task_name() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("argv.log");
        let program = dir.path().join("fake-deno");
        std::fs::write(
            &program,
            format!("#!/bin/sh\necho \"$(pwd -P) :: $*\" > '{}'\n", log.display()),
        )
        .unwrap();
        std::fs::set_permissions(&program, std::fs::Permissions::from_mode(0o755)).unwrap();

        let config = dir.path().join("tasks.jsonc");
        let runner =
            ProcessRunner::delegate_to(program.to_str().unwrap(), dir.path(), &config).unwrap();
        assert!(matches!(runner.strategy(), Strategy::Delegate { .. }));

        let code = runner
            .run_task("build:lib", &TaskDef::from("ignored"))
            .await
            .unwrap();
        assert_eq!(code, 0);

        let logged = std::fs::read_to_string(&log).unwrap();
        let cwd = dir.path().canonicalize().unwrap();
        assert_eq!(
            logged.trim_end(),
            format!(
                "{} :: task --config {} build:lib",
                cwd.display(),
                config.display()
            )
        );
    }
}
