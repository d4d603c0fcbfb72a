//! run-all - run every deno task matching a pattern
//!
//! Tasks are read from `deno.json` or `deno.jsonc`, filtered by a glob-like
//! pattern where `*` matches any run of characters, and run either serially
//! (stopping at the first failure) or in parallel (waiting for all of them).
//!
//! # Example
//!
//! ```jsonc
//! // deno.jsonc
//! {
//!   "tasks": {
//!     "build:lib": "deno compile lib.ts",
//!     "build:docs": "deno doc --html mod.ts",
//!     "test": "deno test"
//!   }
//! }
//! ```
//!
//! # Library Usage
//!
//! ```rust,ignore
//! use run_all::{select, Config, Executor, Mode, ProcessRunner};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (config, path) = Config::load(None)?;
//!     let tasks = config.into_tasks(&path)?;
//!     let names = select("build:*", &tasks)?;
//!
//!     let executor = Executor::new(ProcessRunner::delegate(".", &path)?, Mode::Parallel);
//!     executor.execute(&names, &tasks).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod executor;
pub mod pattern;
pub mod runner;
pub mod select;

// Re-export main types
pub use config::{Config, TaskDef, TaskSet};
pub use error::{Result, RunAllError};
pub use executor::{Executor, Mode, TaskResult};
pub use pattern::{matches, Pattern};
pub use runner::{ProcessRunner, Strategy, TaskRunner};
pub use select::{select, select_compiled};
