//! Split command implementation.
//!
//! Builds the graph from the entry point and prints the chunk assignment.

use carve_config::{ConfigValidator, FsValidator};
use carve_graph::split;
use tracing::info;

use crate::cli::{ProjectArgs, SplitArgs};
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Execute the split command.
///
/// An entry point that does not resolve is reported as a warning and is not
/// an error; `--json` prints `null` in that case.
pub async fn execute(args: SplitArgs, project: &ProjectArgs) -> Result<()> {
    let mut loaded = utils::load_config(project, utils::plan_overrides(&args.plan))?;
    utils::apply_aliases(&mut loaded, &args.plan.resolution);
    for (name, pattern) in args.chunks {
        loaded.config.chunks.insert(name, pattern);
    }
    FsValidator::new(&loaded.project_dir).validate(&loaded.config)?;

    let root = loaded.project_root();
    let options = loaded.config.to_splitter_options(&loaded.project_dir);
    info!(entry = %options.project_entry_point, chunks = options.chunks.len(), "planning split");

    let plan = split(options, utils::runtime()).await?;

    if args.plan.resolution.json {
        return utils::print_json(&plan.as_ref().map(|plan| &plan.assignment));
    }

    match plan {
        Some(plan) => {
            print!("{}", ui::render_assignment(&plan.assignment, &root));
            ui::success(&format!(
                "Assigned {} modules to {} chunks",
                plan.graph.len() - plan.assignment.unassigned.len(),
                plan.assignment.chunks.len()
            ));
        }
        None => ui::warning(&format!(
            "Entry point '{}' could not be resolved from {}",
            loaded.config.entry,
            root.display()
        )),
    }
    Ok(())
}
