//! The `CarveConfig` structure and its conversion into planner options.

use std::path::{Path, PathBuf};
use std::time::Duration;

use carve_graph::resolver::{DEFAULT_EXTENSIONS, DEFAULT_IGNORE_PATTERNS};
use carve_graph::walker::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_MODULES};
use carve_graph::{BuildOptions, ParserPlugin, RawPattern, ResolverOptions, SplitterOptions};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result as ConfigResult};

/// Project configuration, as read from `carve.toml` or the `carve` field of
/// `package.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarveConfig {
    /// Entry specifier, resolved against `root`.
    #[serde(alias = "projectEntryPoint")]
    pub entry: String,

    /// Resolution root. Relative paths are taken from the project directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    pub extensions: Vec<String>,

    /// Alias pattern -> replacement prefix, first match wins.
    pub aliases: IndexMap<String, String>,

    #[serde(alias = "ignore")]
    pub ignore_patterns: Vec<String>,

    /// Chunk name -> path pattern, first match wins.
    pub chunks: IndexMap<String, String>,

    pub plugins: Vec<ParserPlugin>,

    pub follow_re_exports: bool,

    pub max_depth: usize,

    pub max_modules: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_timeout_ms: Option<u64>,

    /// Default log filter when neither flags nor `RUST_LOG` set one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Default for CarveConfig {
    fn default() -> Self {
        Self {
            entry: String::new(),
            root: None,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            aliases: IndexMap::new(),
            ignore_patterns: DEFAULT_IGNORE_PATTERNS.iter().map(|p| p.to_string()).collect(),
            chunks: IndexMap::new(),
            plugins: Vec::new(),
            follow_re_exports: true,
            max_depth: DEFAULT_MAX_DEPTH,
            max_modules: DEFAULT_MAX_MODULES,
            read_timeout_ms: None,
            log_level: None,
        }
    }
}

impl CarveConfig {
    /// Create from serde_json::Value (for programmatic config)
    ///
    /// # Example
    ///
    /// ```
    /// use carve_config::CarveConfig;
    /// use serde_json::json;
    ///
    /// let config = CarveConfig::from_value(json!({
    ///     "entry": "src/index.ts",
    ///     "chunks": { "ui": "/components/" }
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(config.entry, "src/index.ts");
    /// assert_eq!(config.chunks["ui"], "/components/");
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// The resolution root, with a relative `root` joined onto `project_dir`.
    pub fn project_root(&self, project_dir: &Path) -> PathBuf {
        match &self.root {
            Some(root) if root.is_absolute() => root.clone(),
            Some(root) => project_dir.join(root),
            None => project_dir.to_path_buf(),
        }
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_ms.map(Duration::from_millis)
    }

    pub fn to_resolver_options(&self, project_dir: &Path) -> ResolverOptions {
        ResolverOptions::new(self.project_root(project_dir))
            .extensions(self.extensions.iter().cloned())
            .aliases(self.aliases.clone())
            .ignore_patterns(self.ignore_patterns.iter().cloned())
    }

    pub fn to_build_options(&self) -> BuildOptions {
        BuildOptions {
            plugins: self.plugins.clone(),
            follow_re_exports: self.follow_re_exports,
            max_depth: self.max_depth,
            max_modules: self.max_modules,
            read_timeout: self.read_timeout(),
        }
    }

    pub fn to_splitter_options(&self, project_dir: &Path) -> SplitterOptions {
        let mut options =
            SplitterOptions::new(self.entry.clone(), self.to_resolver_options(project_dir))
                .build_options(self.to_build_options());
        options.chunks = self
            .chunks
            .iter()
            .map(|(name, pattern)| (name.clone(), RawPattern::Source(pattern.clone())))
            .collect();
        options
    }
}
