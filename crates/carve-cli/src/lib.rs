//! Carve CLI - plan code-splitting chunks from a module import graph.
//!
//! This crate provides the `carve` command on top of `carve-graph` and
//! `carve-config`.
//!
//! # Architecture
//!
//! - [`cli`] - Argument definitions (clap derive)
//! - [`commands`] - `split`, `graph`, `resolve` and `check`
//! - [`error`] - `CliError` and miette rendering
//! - [`logger`] - `tracing` subscriber setup
//! - [`ui`] - Coloured status messages and listings
//!
//! # Example
//!
//! ```rust,no_run
//! use carve_cli::cli::{PlanArgs, ProjectArgs, SplitArgs};
//! use carve_cli::commands;
//!
//! # async fn run() -> carve_cli::Result<()> {
//! let project = ProjectArgs::default();
//! let args = SplitArgs {
//!     plan: PlanArgs {
//!         entry: Some("src/index.ts".to_string()),
//!         ..Default::default()
//!     },
//!     chunks: vec![("ui".to_string(), "/components/".to_string())],
//! };
//! commands::split_execute(args, &project).await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
