//! Human-readable listings for plans, graphs and resolutions.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use carve_graph::{ChunkAssignment, ImportOutcome, ModuleGraph, ModuleId, ResolveResult};
use owo_colors::Style;

use super::paint;

/// `path` relative to `root` when it lives under it, otherwise as is.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use carve_cli::ui::display_path;
///
/// assert_eq!(display_path(Path::new("/p/src/a.ts"), Path::new("/p")), "src/a.ts");
/// assert_eq!(display_path(Path::new("/q/b.ts"), Path::new("/p")), "/q/b.ts");
/// ```
pub fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

/// One block per chunk in declaration order, then the unassigned modules.
pub fn render_assignment(assignment: &ChunkAssignment, root: &Path) -> String {
    let mut out = String::new();

    for (name, paths) in &assignment.chunks {
        section(&mut out, name, paths, root, Style::new().green().bold());
    }
    if !assignment.unassigned.is_empty() || assignment.chunks.is_empty() {
        section(
            &mut out,
            "(unassigned)",
            &assignment.unassigned,
            root,
            Style::new().dimmed(),
        );
    }

    out
}

fn section(out: &mut String, title: &str, paths: &[PathBuf], root: &Path, style: Style) {
    let count = match paths.len() {
        1 => "1 module".to_string(),
        n => format!("{n} modules"),
    };
    let _ = writeln!(out, "{} {}", paint(title, style), paint(count, Style::new().dimmed()));
    for path in paths {
        let _ = writeln!(out, "  {}", display_path(path, root));
    }
}

/// The import tree from the root module, followed by any cycles.
///
/// A module is expanded the first time it appears; later appearances are
/// marked `(seen)`, or `(cycle)` when the module is its own ancestor.
pub fn render_graph(graph: &ModuleGraph, cycles: &[Vec<ModuleId>], root: &Path) -> String {
    let mut out = String::new();
    let mut expanded = vec![false; graph.len()];
    let mut ancestors = Vec::new();

    let root_path = display_path(graph.root().path(), root);
    let _ = writeln!(out, "{}", paint(root_path, Style::new().bold()));
    expanded[graph.root_id().index()] = true;
    ancestors.push(graph.root_id());
    render_children(graph, graph.root_id(), root, 1, &mut expanded, &mut ancestors, &mut out);

    let modules = match graph.len() {
        1 => "1 module".to_string(),
        n => format!("{n} modules"),
    };
    let _ = writeln!(out, "\n{}", paint(modules, Style::new().dimmed()));

    for cycle in cycles {
        let members: Vec<String> = cycle
            .iter()
            .filter_map(|id| graph.module(*id))
            .map(|module| display_path(module.path(), root))
            .collect();
        let _ = writeln!(
            out,
            "{} {}",
            paint("cycle:", Style::new().yellow().bold()),
            members.join(" -> ")
        );
    }

    out
}

fn render_children(
    graph: &ModuleGraph,
    id: ModuleId,
    root: &Path,
    depth: usize,
    expanded: &mut [bool],
    ancestors: &mut Vec<ModuleId>,
    out: &mut String,
) {
    let Some(node) = graph.module(id) else {
        return;
    };
    let indent = "  ".repeat(depth);

    let imports = node
        .imports
        .iter()
        .map(|import| (import.source.as_str(), Some(import.outcome), false));
    let re_exports = node.exports.iter().filter_map(|export| {
        export
            .re_export
            .as_ref()
            .map(|re_export| (re_export.source.as_str(), re_export.outcome, true))
    });

    for (source, outcome, is_re_export) in imports.chain(re_exports) {
        let label = if is_re_export {
            format!("{source} {}", paint("(re-export)", Style::new().dimmed()))
        } else {
            source.to_string()
        };

        match outcome {
            Some(ImportOutcome::Resolved { module }) => {
                let path = graph
                    .module(module)
                    .map(|target| display_path(target.path(), root))
                    .unwrap_or_default();
                if ancestors.contains(&module) {
                    let _ = writeln!(out, "{indent}{label} -> {path} {}", paint("(cycle)", Style::new().yellow()));
                } else if expanded[module.index()] {
                    let _ = writeln!(out, "{indent}{label} -> {path} {}", paint("(seen)", Style::new().dimmed()));
                } else {
                    let _ = writeln!(out, "{indent}{label} -> {path}");
                    expanded[module.index()] = true;
                    ancestors.push(module);
                    render_children(graph, module, root, depth + 1, expanded, ancestors, out);
                    ancestors.pop();
                }
            }
            Some(ImportOutcome::Skipped { reason }) => {
                let _ = writeln!(
                    out,
                    "{indent}{label} {}",
                    paint(format!("[{reason}]"), Style::new().yellow())
                );
            }
            None => {
                let _ = writeln!(out, "{indent}{label} {}", paint("[not followed]", Style::new().dimmed()));
            }
        }
    }
}

/// One line describing where a specifier resolved, or why it did not.
pub fn render_resolution(specifier: &str, result: &ResolveResult, root: &Path) -> String {
    let path = display_path(result.candidate(), root);
    match result.skip_reason() {
        None => format!("{specifier} -> {}", paint(path, Style::new().green())),
        Some(reason) => format!(
            "{specifier} {} ({path})",
            paint(format!("[{reason}]"), Style::new().yellow())
        ),
    }
}
