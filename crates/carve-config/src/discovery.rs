//! File-based config discovery for CLI use
//!
//! Handles finding and reading Carve configuration files from the filesystem.

// Config discovery runs before any Runtime exists, so it reads with std::fs.
#![allow(clippy::disallowed_methods)]

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::config::CarveConfig;
use crate::error::{ConfigError, Result};

/// Dedicated config file name.
pub const CONFIG_FILE_NAME: &str = "carve.toml";

/// Field of `package.json` holding the config.
pub const PACKAGE_JSON_FIELD: &str = "carve";

/// File-based configuration discovery
///
/// # Example
///
/// ```no_run
/// use carve_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let config = discovery.load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    /// Create a new config discovery with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. TOML config: carve.toml
    /// 2. package.json (carve field)
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join(CONFIG_FILE_NAME);
        if toml_path.is_file() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        if pkg_path.is_file() {
            if let Ok(content) = fs::read_to_string(&pkg_path) {
                if let Ok(parsed) = serde_json::from_str::<Value>(&content) {
                    if parsed.get(PACKAGE_JSON_FIELD).is_some_and(|v| !v.is_null()) {
                        return Some(pkg_path);
                    }
                }
            }
        }

        None
    }

    /// Load config from the discovered file, without environment layering.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<CarveConfig> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        load_from(&path)
    }
}

/// Load config from a specific file.
pub fn load_from(path: &Path) -> Result<CarveConfig> {
    let source = read_source(path)?;
    let mut config = CarveConfig::from_value(source.value)?;
    source.ordered.apply(&mut config);
    Ok(config)
}

/// Discover and load config from the current directory (convenience function)
pub fn discover() -> Result<CarveConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load()
}

/// Config file contents as a JSON value, plus the order-sensitive maps read
/// straight from the file text.
pub(crate) struct ConfigSource {
    pub value: Value,
    pub ordered: OrderedSections,
}

/// Alias and chunk tables in document order. First match wins for both, so
/// their order must survive layering.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct OrderedSections {
    #[serde(default)]
    aliases: Option<IndexMap<String, String>>,
    #[serde(default)]
    chunks: Option<IndexMap<String, String>>,
}

impl OrderedSections {
    /// Reorder `config`'s maps to document order. A map whose keys were
    /// changed by a later layer is left alone.
    pub fn apply(self, config: &mut CarveConfig) {
        restore_order(&mut config.aliases, self.aliases);
        restore_order(&mut config.chunks, self.chunks);
    }
}

fn restore_order(target: &mut IndexMap<String, String>, ordered: Option<IndexMap<String, String>>) {
    let Some(ordered) = ordered else {
        return;
    };
    if ordered.len() != target.len() || !ordered.keys().all(|key| target.contains_key(key)) {
        return;
    }
    let reordered = ordered
        .keys()
        .filter_map(|key| target.swap_remove_entry(key))
        .collect();
    *target = reordered;
}

#[derive(Deserialize)]
struct PackageJsonSections {
    #[serde(default, rename = "carve")]
    sections: Option<OrderedSections>,
}

pub(crate) fn read_source(path: &Path) -> Result<ConfigSource> {
    let content = fs::read_to_string(path)?;

    if path.file_name() == Some(std::ffi::OsStr::new("package.json")) {
        return read_package_json(&content);
    }

    let is_json = path.extension().is_some_and(|ext| ext == "json");
    if is_json {
        let value: Value = serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
            field: path.display().to_string(),
            hint: Some(format!("Invalid JSON: {e}")),
        })?;
        let ordered = serde_json::from_str(&content).unwrap_or_default();
        return Ok(ConfigSource { value, ordered });
    }

    let toml_val: toml::Value = toml::from_str(&content).map_err(|e| ConfigError::InvalidValue {
        field: path.display().to_string(),
        hint: Some(format!("Invalid TOML syntax: {e}")),
    })?;
    let value = serde_json::to_value(toml_val).map_err(|e| ConfigError::InvalidValue {
        field: path.display().to_string(),
        hint: Some(format!("TOML to JSON conversion failed: {e}")),
    })?;
    let ordered = toml::from_str(&content).unwrap_or_default();
    Ok(ConfigSource { value, ordered })
}

fn read_package_json(content: &str) -> Result<ConfigSource> {
    let parsed: Value = serde_json::from_str(content).map_err(|e| ConfigError::InvalidValue {
        field: "package.json".to_string(),
        hint: Some(format!("Invalid JSON: {e}")),
    })?;

    let value = match parsed.get(PACKAGE_JSON_FIELD) {
        Some(value) if !value.is_null() => value.clone(),
        _ => {
            return Err(ConfigError::InvalidValue {
                field: PACKAGE_JSON_FIELD.to_string(),
                hint: Some("Add a 'carve' field to your package.json".to_string()),
            });
        }
    };

    let ordered = serde_json::from_str::<PackageJsonSections>(content)
        .ok()
        .and_then(|pkg| pkg.sections)
        .unwrap_or_default();
    Ok(ConfigSource { value, ordered })
}
