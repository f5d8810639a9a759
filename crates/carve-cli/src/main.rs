//! Carve CLI - plan code-splitting chunks from a module import graph.
//!
//! Parses arguments, initializes logging and dispatches to the command.

use carve_cli::{cli, commands, error, logger, ui};
use clap::Parser;
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // The config file may carry a default log filter, so peek at it first.
    let log_level = commands::utils::configured_log_level(&args.project);
    logger::init_logger(args.verbose, args.quiet, args.no_color, log_level.as_deref());
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Split(split_args) => commands::split_execute(split_args, &args.project).await,
        cli::Command::Graph(graph_args) => commands::graph_execute(graph_args, &args.project).await,
        cli::Command::Resolve(resolve_args) => {
            commands::resolve_execute(resolve_args, &args.project).await
        }
        cli::Command::Check => commands::check_execute(&args.project).await,
    };

    result.map_err(error::cli_error_to_miette)
}
