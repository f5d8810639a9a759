//! Error types for configuration loading and validation.

use std::path::PathBuf;

use carve_graph::PatternError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Loading errors
    #[error("config not found")]
    NotFound,

    #[error("invalid config value for '{field}': {}", .hint.as_deref().unwrap_or("unexpected value"))]
    InvalidValue { field: String, hint: Option<String> },

    #[error("failed to load configuration: {0}")]
    Load(String),

    // Schema validation errors (no filesystem checks)
    #[error("no entry point specified")]
    NoEntry,

    #[error("invalid extension '{0}': extensions must contain more than a dot")]
    InvalidExtension(String),

    #[error("invalid {field} pattern: {source}")]
    InvalidPattern {
        field: &'static str,
        #[source]
        source: PatternError,
    },

    #[error("schema validation failed: {message}")]
    SchemaValidation {
        message: String,
        hint: Option<String>,
    },

    // Filesystem validation errors (for CLI use)
    #[error("project root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Load(err.to_string())
    }
}
