use carve_graph::ParserPlugin;
use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::validation::parse_key_value;

/// Available Carve subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Assign modules to chunks
    ///
    /// Builds the import graph from the entry point and places every module
    /// in the first chunk whose pattern matches its path.
    Split(SplitArgs),

    /// Print the module graph
    ///
    /// Shows the import tree from the entry point, skipped imports and any
    /// import cycles.
    Graph(GraphArgs),

    /// Resolve a single specifier
    Resolve(ResolveArgs),

    /// Validate the configuration
    Check,
}

/// Resolver overrides shared by every command that resolves specifiers.
#[derive(Args, Debug, Clone, Default)]
pub struct ResolutionArgs {
    /// Extension to probe, in order (repeatable; replaces configured extensions)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Alias rule PATTERN=PREFIX, added after configured aliases (repeatable)
    #[arg(long = "alias", value_name = "PATTERN=PREFIX", value_parser = parse_key_value)]
    pub aliases: Vec<(String, String)>,

    /// Ignore pattern (repeatable; replaces configured ignore patterns)
    #[arg(long = "ignore", value_name = "PATTERN")]
    pub ignore_patterns: Vec<String>,

    /// Print machine-readable JSON instead of a listing
    #[arg(long)]
    pub json: bool,
}

/// Graph building options shared by `split` and `graph`.
#[derive(Args, Debug, Clone, Default)]
pub struct PlanArgs {
    /// Entry specifier (overrides `entry` from the config file)
    #[arg(value_name = "ENTRY")]
    pub entry: Option<String>,

    #[command(flatten)]
    pub resolution: ResolutionArgs,

    /// Parser plugin to enable for every file: jsx or typescript (repeatable)
    #[arg(long = "plugin", value_name = "PLUGIN")]
    pub plugins: Vec<ParserPlugin>,

    /// Do not follow `export ... from` sources
    #[arg(long)]
    pub no_follow_re_exports: bool,

    /// Abandon reading a module after this many milliseconds
    #[arg(long, value_name = "MS")]
    pub read_timeout_ms: Option<u64>,
}

/// Arguments for the split command
#[derive(Args, Debug, Clone, Default)]
pub struct SplitArgs {
    #[command(flatten)]
    pub plan: PlanArgs,

    /// Chunk rule NAME=PATTERN, added after configured chunks (repeatable)
    ///
    /// Examples:
    ///   carve split --chunk ui=/components/ --chunk vendor=/lib/
    #[arg(long = "chunk", value_name = "NAME=PATTERN", value_parser = parse_key_value)]
    pub chunks: Vec<(String, String)>,
}

/// Arguments for the graph command
#[derive(Args, Debug, Clone, Default)]
pub struct GraphArgs {
    #[command(flatten)]
    pub plan: PlanArgs,
}

/// Arguments for the resolve command
#[derive(Args, Debug, Clone, Default)]
pub struct ResolveArgs {
    /// Import specifier, e.g. `./utils` or `@/components/Button`
    #[arg(value_name = "SPECIFIER")]
    pub specifier: String,

    /// File containing the import; relative specifiers resolve from its directory
    #[arg(long, value_name = "FILE")]
    pub from: Option<PathBuf>,

    #[command(flatten)]
    pub resolution: ResolutionArgs,
}
