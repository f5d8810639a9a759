//! Layered configuration loading.
//!
//! Priority: caller overrides > environment variables > config file > defaults.

use std::path::{Path, PathBuf};

use carve_graph::ParserPlugin;
use figment::Figment;
use figment::providers::{Env, Format as _, Serialized, Toml};
use serde::Serialize;
use tracing::debug;

use crate::config::CarveConfig;
use crate::discovery::{ConfigDiscovery, OrderedSections, read_source};
use crate::error::Result;

/// Default prefix for environment overrides, e.g. `CARVE_ENTRY` or
/// `CARVE_MAX_DEPTH`.
pub const ENV_PREFIX: &str = "CARVE_";

/// Values supplied by the caller, typically command line flags. Only the
/// fields that are set take part in the merge.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_patterns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Vec<ParserPlugin>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_re_exports: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_timeout_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

/// A loaded configuration and where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: CarveConfig,
    /// The config file that contributed, if any.
    pub source: Option<PathBuf>,
    /// Directory relative `root` values are taken from: the config file's
    /// directory, or the directory loading started in.
    pub project_dir: PathBuf,
}

impl LoadedConfig {
    pub fn project_root(&self) -> PathBuf {
        self.config.project_root(&self.project_dir)
    }
}

/// Builder for layered configuration loading.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    project_dir: PathBuf,
    config_file: Option<PathBuf>,
    env_prefix: String,
    overrides: ConfigOverrides,
}

impl ConfigLoader {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            config_file: None,
            env_prefix: ENV_PREFIX.to_string(),
            overrides: ConfigOverrides::default(),
        }
    }

    /// Use this file instead of discovering one.
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Merge every layer and extract the result. Validation is left to the
    /// caller.
    pub fn load(&self) -> Result<LoadedConfig> {
        let file = match &self.config_file {
            Some(path) => Some(self.project_dir.join(path)),
            None => ConfigDiscovery::new(&self.project_dir).find(),
        };

        let mut figment = Figment::new().merge(Serialized::defaults(CarveConfig::default()));

        let mut ordered = OrderedSections::default();
        if let Some(path) = &file {
            debug!(path = %path.display(), "loading config file");
            let is_toml = path.extension().is_some_and(|ext| ext == "toml");
            let source = read_source(path)?;
            figment = if is_toml {
                figment.merge(Toml::file(path))
            } else {
                figment.merge(Serialized::defaults(source.value))
            };
            ordered = source.ordered;
        }

        // Double underscore separates nesting so snake_case keys stay whole.
        figment = figment
            .merge(Env::prefixed(&self.env_prefix).split("__"))
            .merge(Serialized::defaults(&self.overrides));

        let mut config: CarveConfig = figment.extract()?;
        ordered.apply(&mut config);

        let project_dir = file
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.project_dir.clone());

        Ok(LoadedConfig {
            config,
            source: file,
            project_dir,
        })
    }
}
