//! Logging infrastructure for the Carve CLI.
//!
//! Library crates only emit `tracing` events; this module installs the
//! subscriber that prints them.
//!
//! # Example
//!
//! ```rust,no_run
//! use carve_cli::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(false, false, false, None);
//! info!("Planning split");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose events the CLI shows.
const CRATES: &[&str] = &["carve_graph", "carve_config", "carve_cli"];

/// Initialize the tracing subscriber with the specified options.
///
/// The filter is chosen in this order:
/// 1. `--verbose`: DEBUG for carve crates
/// 2. `--quiet`: ERROR only
/// 3. `RUST_LOG` environment variable
/// 4. `log_level` from the config file
/// 5. INFO for carve crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool, log_level: Option<&str>) {
    init_logger_with_filter(build_filter(verbose, quiet, log_level), no_color);
}

/// Initialize logger with custom environment filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    // A second initialization (tests) is not an error worth reporting.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn build_filter(verbose: bool, quiet: bool, log_level: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new(directives("debug"));
    }
    if quiet {
        return EnvFilter::new(directives("error"));
    }
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    log_level
        .and_then(|level| EnvFilter::try_new(directives(level)).ok())
        .unwrap_or_else(|| EnvFilter::new(directives("info")))
}

fn directives(level: &str) -> String {
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Check if colored output should be enabled.
///
/// `NO_COLOR` disables colors, `FORCE_COLOR` forces them, otherwise the
/// terminal decides.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::Term::stderr().features().colors_supported()
}
