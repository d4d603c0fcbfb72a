//! Error types for run-all
//!
//! Uses `miette` for pretty error reporting with help text.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for run-all operations
#[derive(Error, Diagnostic, Debug)]
pub enum RunAllError {
    #[error("deno.json or deno.jsonc not found")]
    #[diagnostic(
        code(run_all::config::not_found),
        help("Run from a Deno project directory, or specify a config file with --config")
    )]
    ConfigNotFound { searched: Vec<PathBuf> },

    #[error("Failed to parse {}: {message}", .path.display())]
    #[diagnostic(code(run_all::config::parse))]
    ConfigParse { path: PathBuf, message: String },

    #[error("No tasks found in {}", .path.display())]
    #[diagnostic(
        code(run_all::config::no_tasks),
        help("Declare tasks under the \"tasks\" key")
    )]
    NoTasks { path: PathBuf },

    #[error("No tasks matching pattern: {pattern}")]
    #[diagnostic(code(run_all::select::no_match))]
    NoMatch {
        pattern: String,
        #[help]
        available: Option<String>,
    },

    #[error("Invalid pattern '{pattern}'")]
    #[diagnostic(code(run_all::select::invalid_pattern))]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Task '{name}' not found")]
    #[diagnostic(code(run_all::task::not_found))]
    TaskNotFound { name: String },

    #[error("Task {task} failed with exit code {code}")]
    #[diagnostic(code(run_all::exec::failed))]
    TaskFailed { task: String, code: i32 },

    #[error("Command not found: {command}")]
    #[diagnostic(
        code(run_all::exec::command_not_found),
        help("Ensure the command is installed and in your PATH, or pass --shell")
    )]
    CommandNotFound { command: String },

    #[error("Failed to start task {task}")]
    #[diagnostic(code(run_all::exec::spawn))]
    Spawn {
        task: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error")]
    #[diagnostic(code(run_all::io))]
    Io(#[from] std::io::Error),
}

impl RunAllError {
    /// Build a `NoMatch` error listing the names that were available
    pub fn no_match<'a>(pattern: &str, available: impl IntoIterator<Item = &'a str>) -> Self {
        let names: Vec<&str> = available.into_iter().collect();
        let available = if names.is_empty() {
            None
        } else {
            Some(format!("Available tasks: {}", names.join(", ")))
        };

        Self::NoMatch {
            pattern: pattern.to_string(),
            available,
        }
    }
}

/// Result type alias for run-all operations
pub type Result<T> = std::result::Result<T, RunAllError>;
