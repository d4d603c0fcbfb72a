//! CLI argument definitions
//!
//! Uses `clap` derive API for argument parsing.

use std::path::PathBuf;

use clap::Parser;

/// Run every deno task whose name matches a pattern
#[derive(Parser, Debug)]
#[command(name = "run-all")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Examples:\n  run-all 'build:*'\n  run-all --parallel 'test:*'\n  run-all -p 'lint:*'")]
pub struct Cli {
    /// Task name pattern; `*` matches any run of characters
    #[arg(required = true)]
    pub pattern: String,

    /// Run tasks in parallel
    #[arg(short, long)]
    pub parallel: bool,

    /// Run task commands through the shell instead of `deno task`
    #[arg(long)]
    pub shell: bool,

    /// Show matching tasks without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Path to deno.json or deno.jsonc
    #[arg(short, long, env = "RUN_ALL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Working directory
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
