//! Helpers shared by the commands: locating the project and loading its
//! configuration with command line overrides applied.

use std::path::PathBuf;
use std::sync::Arc;

use carve_config::{ConfigLoader, ConfigOverrides, LoadedConfig};
use carve_graph::{NativeRuntime, Runtime};
use tracing::debug;

use crate::cli::{PlanArgs, ProjectArgs, ResolutionArgs};
use crate::error::{CliError, Result};

/// The directory commands run in: `--cwd` joined onto the process directory.
pub fn project_dir(project: &ProjectArgs) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    let dir = match &project.cwd {
        Some(dir) => cwd.join(dir),
        None => cwd,
    };
    if !dir.is_dir() {
        return Err(CliError::DirectoryNotFound(dir));
    }
    Ok(dir)
}

/// Load the configuration for `project` with `overrides` layered on top.
///
/// `--root` is taken relative to the directory the command runs in, not to
/// the config file.
pub fn load_config(project: &ProjectArgs, mut overrides: ConfigOverrides) -> Result<LoadedConfig> {
    let dir = project_dir(project)?;
    overrides.root = project.root.as_ref().map(|root| dir.join(root));

    let mut loader = ConfigLoader::new(&dir).overrides(overrides);
    if let Some(file) = &project.config {
        loader = loader.config_file(file);
    }
    let loaded = loader.load()?;
    match &loaded.source {
        Some(source) => debug!(config = %source.display(), "loaded config"),
        None => debug!(dir = %dir.display(), "no config file, using defaults"),
    }
    Ok(loaded)
}

/// Overrides carried by the resolver flags.
pub fn resolution_overrides(args: &ResolutionArgs) -> ConfigOverrides {
    ConfigOverrides {
        extensions: non_empty(&args.extensions),
        ignore_patterns: non_empty(&args.ignore_patterns),
        ..Default::default()
    }
}

/// Overrides carried by the graph building flags.
pub fn plan_overrides(args: &PlanArgs) -> ConfigOverrides {
    ConfigOverrides {
        entry: args.entry.clone(),
        plugins: non_empty(&args.plugins),
        follow_re_exports: args.no_follow_re_exports.then_some(false),
        read_timeout_ms: args.read_timeout_ms,
        ..resolution_overrides(&args.resolution)
    }
}

/// Append `--alias` rules after the configured ones. Repeating a configured
/// pattern replaces its prefix in place.
pub fn apply_aliases(loaded: &mut LoadedConfig, args: &ResolutionArgs) {
    for (pattern, prefix) in &args.aliases {
        loaded.config.aliases.insert(pattern.clone(), prefix.clone());
    }
}

pub fn runtime() -> Arc<dyn Runtime> {
    Arc::new(NativeRuntime::new())
}

/// `log_level` from the config file, if one can be loaded. Errors are left
/// for the command itself to report.
pub fn configured_log_level(project: &ProjectArgs) -> Option<String> {
    load_config(project, ConfigOverrides::default())
        .ok()
        .and_then(|loaded| loaded.config.log_level)
}

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn non_empty<T: Clone>(values: &[T]) -> Option<Vec<T>> {
    (!values.is_empty()).then(|| values.to_vec())
}
