//! Check command implementation.
//!
//! Loads the layered configuration and validates it without building.

use carve_config::{ConfigOverrides, ConfigValidator, FsValidator};

use crate::cli::ProjectArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Execute the check command.
pub async fn execute(project: &ProjectArgs) -> Result<()> {
    let loaded = utils::load_config(project, ConfigOverrides::default())?;

    match &loaded.source {
        Some(source) => ui::info(&format!("Using {}", source.display())),
        None => ui::warning("No carve.toml or package.json \"carve\" field found, using defaults"),
    }

    FsValidator::new(&loaded.project_dir).validate(&loaded.config)?;

    let config = &loaded.config;
    ui::success("Configuration is valid!");
    println!("entry:      {}", config.entry);
    println!("root:       {}", loaded.project_root().display());
    println!("extensions: {}", config.extensions.join(", "));
    println!("aliases:    {}", config.aliases.len());
    println!("chunks:     {}", config.chunks.keys().cloned().collect::<Vec<_>>().join(", "));
    Ok(())
}
