//! Resolve command implementation.
//!
//! Runs a single specifier through the configured resolver. Skips (ignored,
//! not found, unsupported) are outcomes, not errors.

use carve_graph::PathResolver;

use crate::cli::{ProjectArgs, ResolveArgs};
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Execute the resolve command.
pub async fn execute(args: ResolveArgs, project: &ProjectArgs) -> Result<()> {
    let mut loaded = utils::load_config(project, utils::resolution_overrides(&args.resolution))?;
    utils::apply_aliases(&mut loaded, &args.resolution);

    let root = loaded.project_root();
    let resolver = PathResolver::new(loaded.config.to_resolver_options(&loaded.project_dir))?;

    // Relative --from paths are taken from the directory the command runs in.
    let dir = utils::project_dir(project)?;
    let importer_dir = args
        .from
        .as_ref()
        .and_then(|from| dir.join(from).parent().map(|parent| parent.to_path_buf()));

    let runtime = utils::runtime();
    let result = resolver
        .resolve(&args.specifier, importer_dir.as_deref(), runtime.as_ref())
        .await?;

    if args.resolution.json {
        return utils::print_json(&result);
    }
    println!("{}", ui::render_resolution(&args.specifier, &result, &root));
    Ok(())
}
