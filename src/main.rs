//! run-all - run every deno task matching a pattern
//!
//! Loads `deno.json` / `deno.jsonc`, selects the tasks whose names match the
//! pattern and runs them one after another, or all at once with `--parallel`.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use console::style;

mod cli;

use cli::Cli;
use run_all::{
    select_compiled, Config, Executor, Mode, Pattern, ProcessRunner, Result, RunAllError, TaskSet,
};

#[tokio::main]
async fn main() -> ExitCode {
    // Set up panic handler for nice error messages
    miette::set_panic_hook();

    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {:?}", style("error").red().bold(), miette::Report::new(e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Change working directory if specified
    if let Some(cwd) = &cli.cwd {
        std::env::set_current_dir(cwd)?;
    }

    let (config, path) = Config::load(cli.config.as_deref())?;
    let tasks = config.into_tasks(&path)?;

    let pattern = Pattern::new(&cli.pattern)?;
    let names = select_compiled(&pattern, &tasks);

    if names.is_empty() {
        return Err(RunAllError::no_match(&cli.pattern, tasks.names()));
    }

    println!(
        "Found {} matching tasks: {}",
        names.len(),
        names.join(", ")
    );

    if cli.dry_run {
        print_dry_run(&names, &tasks);
        return Ok(());
    }

    let root = project_root(&path);
    let mode = Mode::from_parallel(cli.parallel);

    if cli.shell {
        Executor::new(ProcessRunner::shell(root), mode)
            .execute(&names, &tasks)
            .await?;
    } else {
        Executor::new(ProcessRunner::delegate(root, &path)?, mode)
            .execute(&names, &tasks)
            .await?;
    }

    Ok(())
}

/// Directory tasks run in: the one holding the config file
fn project_root(config_path: &Path) -> &Path {
    match config_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

fn print_dry_run(names: &[&str], tasks: &TaskSet) {
    println!();
    for name in names {
        let Some(task) = tasks.get(name) else {
            continue;
        };

        print!("  {}", style(name).cyan().bold());
        if let Some(desc) = &task.description {
            print!("  {}", style(desc).dim());
        }
        println!();
        println!("    {} {}", style("→").dim(), task.command);
    }
}
