//! Configuration for the Carve code-splitting planner.
//!
//! A project is configured through `carve.toml` or the `carve` field of
//! `package.json`. [`ConfigLoader`] layers the file over built-in defaults,
//! then applies `CARVE_*` environment variables and caller overrides.

pub mod config;
pub mod discovery;
pub mod error;
pub mod loading;
pub mod validation;

pub use config::CarveConfig;
pub use error::{ConfigError, Result};

pub use discovery::{CONFIG_FILE_NAME, ConfigDiscovery, PACKAGE_JSON_FIELD, discover, load_from};
pub use loading::{ConfigLoader, ConfigOverrides, ENV_PREFIX, LoadedConfig};
pub use validation::{ConfigValidator, FsValidator, SchemaValidator, validate_fs, validate_schema};
