//! Command-line interface definition for Carve.
//!
//! # Command Structure
//!
//! - `carve split` - Assign every module reachable from the entry to a chunk
//! - `carve graph` - Print the module graph and its cycles
//! - `carve resolve` - Show how a single specifier resolves
//! - `carve check` - Validate the configuration

mod commands;
mod validation;

use clap::{Args, Parser};
use std::path::PathBuf;

pub use commands::{Command, GraphArgs, PlanArgs, ResolutionArgs, ResolveArgs, SplitArgs};
pub use validation::parse_key_value;

/// Carve - code-splitting planner for JavaScript and TypeScript projects
#[derive(Parser, Debug)]
#[command(
    name = "carve",
    version,
    about = "Plan code-splitting chunks from a module import graph",
    long_about = "Carve follows every static import and re-export from an entry point,\n\
                  builds the module graph and assigns each module to a named chunk\n\
                  using ordered path patterns."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(flatten)]
    pub project: ProjectArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Where the project lives and how it is configured. Shared by all commands.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Run as if started in DIR
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Config file to use instead of discovering carve.toml or package.json
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Resolution root (defaults to the config file's directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,
}
