//! Miette diagnostic conversion for CLI errors.

use crate::error::CliError;
use carve_config::ConfigError;
use carve_graph::{BuildError, SplitError};
use ::miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => config_error_to_miette(e),
        CliError::Build(e) | CliError::Split(SplitError::Build(e)) => build_error_to_miette(e),
        _ => ::miette::miette!("{}", err),
    }
}

fn config_error_to_miette(err: ConfigError) -> Report {
    match err {
        ConfigError::NoEntry => ::miette::miette!(
            "No entry point specified\n\nHint: Pass an entry (`carve split src/index.ts`) or set `entry` in carve.toml"
        ),
        ConfigError::InvalidPattern { field, source } => ::miette::miette!(
            "Invalid {} pattern: {}\n\nHint: Patterns are regular expressions; write `/body/flags` for a literal with flags",
            field,
            source
        ),
        ConfigError::RootNotFound(path) => ::miette::miette!(
            "Project root not found: {}\n\nHint: Check `root` in the config file or pass --root",
            path.display()
        ),
        other => ::miette::miette!("Configuration error: {}", other),
    }
}

/// Convert BuildError to miette Report
pub fn build_error_to_miette(err: BuildError) -> Report {
    match err {
        BuildError::Parse(e) => ::miette::miette!(
            "{}\n\nHint: Enable the syntax the file needs with --plugin typescript or --plugin jsx",
            e
        ),
        BuildError::MaxDepthExceeded { depth, max } => ::miette::miette!(
            "Import chain is deeper than {} modules (reached {})\n\nHint: Raise `max_depth` in carve.toml",
            max,
            depth
        ),
        BuildError::TooManyModules { count, max } => ::miette::miette!(
            "Graph has more than {} modules (reached {})\n\nHint: Raise `max_modules` or add ignore patterns",
            max,
            count
        ),
        BuildError::FileTooLarge { path, size, max } => ::miette::miette!(
            "File too large: {} is {} bytes (max: {} bytes)\n\nHint: Add an ignore pattern for generated or bundled files",
            path.display(),
            size,
            max
        ),
        other => ::miette::miette!("Build error: {}", other),
    }
}
