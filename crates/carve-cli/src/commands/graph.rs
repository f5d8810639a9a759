//! Graph command implementation.
//!
//! Builds the module graph and prints it as a tree (or JSON) together with
//! any import cycles.

use carve_config::{ConfigValidator, FsValidator};
use carve_graph::{GraphBuilder, ModuleGraph, ModuleId, PathResolver};
use serde::Serialize;

use crate::cli::{GraphArgs, ProjectArgs};
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

#[derive(Serialize)]
struct GraphReport<'a> {
    graph: &'a ModuleGraph,
    cycles: Vec<Vec<ModuleId>>,
}

/// Execute the graph command.
pub async fn execute(args: GraphArgs, project: &ProjectArgs) -> Result<()> {
    let mut loaded = utils::load_config(project, utils::plan_overrides(&args.plan))?;
    utils::apply_aliases(&mut loaded, &args.plan.resolution);
    FsValidator::new(&loaded.project_dir).validate(&loaded.config)?;

    let root = loaded.project_root();
    let resolver = PathResolver::new(loaded.config.to_resolver_options(&loaded.project_dir))?;
    let builder = GraphBuilder::new(resolver, loaded.config.to_build_options());
    let graph = builder.build(&loaded.config.entry, utils::runtime()).await?;

    let Some(graph) = graph else {
        if args.plan.resolution.json {
            return utils::print_json(&Option::<GraphReport>::None);
        }
        ui::warning(&format!(
            "Entry point '{}' could not be resolved from {}",
            loaded.config.entry,
            root.display()
        ));
        return Ok(());
    };

    let cycles = graph.find_cycles();
    if args.plan.resolution.json {
        return utils::print_json(&GraphReport {
            graph: &graph,
            cycles,
        });
    }

    print!("{}", ui::render_graph(&graph, &cycles, &root));
    if !cycles.is_empty() {
        ui::warning(&format!("Found {} import cycles", cycles.len()));
    }
    Ok(())
}
