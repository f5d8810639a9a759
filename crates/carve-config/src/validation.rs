//! Pluggable config validation strategies
//!
//! Schema validation compiles every pattern without touching the disk.
//! Filesystem validation additionally checks that the project root exists.

use std::path::{Path, PathBuf};

use carve_graph::normalize_pattern;
use carve_graph::resolver::normalize_extension;

use crate::config::CarveConfig;
use crate::error::{ConfigError, Result};

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    fn validate(&self, config: &CarveConfig) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use carve_config::{CarveConfig, ConfigValidator, SchemaValidator};
///
/// let mut config = CarveConfig::default();
/// config.entry = "src/index.ts".into();
/// config.chunks.insert("ui".into(), "/components/".into());
///
/// SchemaValidator.validate(&config).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &CarveConfig) -> Result<()> {
        if config.entry.trim().is_empty() {
            return Err(ConfigError::NoEntry);
        }

        if config.extensions.is_empty() {
            return Err(ConfigError::SchemaValidation {
                message: "at least one extension is required".to_string(),
                hint: Some("Remove 'extensions' to use the defaults".to_string()),
            });
        }
        for extension in &config.extensions {
            if normalize_extension(extension).is_none() {
                return Err(ConfigError::InvalidExtension(extension.clone()));
            }
        }

        for pattern in config.aliases.keys() {
            compile("alias", pattern)?;
        }
        for pattern in &config.ignore_patterns {
            compile("ignore", pattern)?;
        }
        for (name, pattern) in &config.chunks {
            if name.trim().is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: "chunk names cannot be empty".to_string(),
                    hint: None,
                });
            }
            compile("chunk", pattern)?;
        }

        if config.max_depth == 0 || config.max_modules == 0 {
            return Err(ConfigError::SchemaValidation {
                message: "max_depth and max_modules must be greater than zero".to_string(),
                hint: Some("Leave them unset to use the defaults".to_string()),
            });
        }

        if config.read_timeout_ms == Some(0) {
            return Err(ConfigError::SchemaValidation {
                message: "read_timeout_ms must be greater than zero".to_string(),
                hint: Some("Leave it unset to disable read timeouts".to_string()),
            });
        }

        Ok(())
    }
}

fn compile(field: &'static str, pattern: &str) -> Result<()> {
    normalize_pattern(pattern)
        .map(drop)
        .map_err(|source| ConfigError::InvalidPattern { field, source })
}

/// Filesystem validator (for CLI use)
///
/// Runs schema validation, then checks that the resolution root is an
/// existing directory.
///
/// # Example
///
/// ```no_run
/// use carve_config::{CarveConfig, ConfigValidator, FsValidator};
///
/// let mut config = CarveConfig::default();
/// config.entry = "src/index.ts".into();
///
/// FsValidator::new(".").validate(&config).unwrap();
/// ```
pub struct FsValidator {
    project_dir: PathBuf,
}

impl FsValidator {
    /// Create a validator resolving relative roots against `project_dir`.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            project_dir: project_dir.as_ref().to_path_buf(),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, config: &CarveConfig) -> Result<()> {
        SchemaValidator.validate(config)?;

        let root = config.project_root(&self.project_dir);
        if !root.is_dir() {
            return Err(ConfigError::RootNotFound(root));
        }

        Ok(())
    }
}

/// Convenience function for schema-only validation
pub fn validate_schema(config: &CarveConfig) -> Result<()> {
    SchemaValidator.validate(config)
}

/// Convenience function for filesystem validation
pub fn validate_fs(config: &CarveConfig, project_dir: impl AsRef<Path>) -> Result<()> {
    FsValidator::new(project_dir).validate(config)
}

impl CarveConfig {
    /// Schema validation, see [`SchemaValidator`].
    pub fn validate(&self) -> Result<()> {
        validate_schema(self)
    }
}
