//! Error handling for the Carve CLI.
//!
//! Library errors convert into [`CliError`] through `#[from]`; `main` renders
//! the final error with miette via [`cli_error_to_miette`].

mod miette;

use carve_graph::{BuildError, ResolverError, RuntimeError, SplitError};
use std::path::PathBuf;
use thiserror::Error;

pub use self::miette::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration loading or validation failed
    #[error("Configuration error: {0}")]
    Config(#[from] carve_config::ConfigError),

    /// Invalid resolver options (bad extension or pattern)
    #[error("Invalid resolver options: {0}")]
    Resolver(#[from] ResolverError),

    /// Graph building failed
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Split planning failed
    #[error("Split error: {0}")]
    Split(#[from] SplitError),

    /// Filesystem probing failed during resolution
    #[error("Resolution failed: {0}")]
    Runtime(#[from] RuntimeError),

    /// Working directory does not exist
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
