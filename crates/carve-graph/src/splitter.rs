//! End-to-end planning: resolve the entry, build the graph, assign chunks.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{info, warn};

use crate::chunks::{ChunkAssignment, ChunkRules, assign_chunks};
use crate::graph::ModuleGraph;
use crate::pattern::{PatternError, RawPattern};
use crate::resolver::{PathResolver, ResolverError, ResolverOptions};
use crate::runtime::{Runtime, RuntimeError};
use crate::walker::{BuildError, BuildOptions, GraphBuilder};

/// Error that can occur while planning a split.
#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    #[error(transparent)]
    Resolver(#[from] ResolverError),

    #[error("invalid chunk rule: {0}")]
    ChunkRule(#[from] PatternError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("cannot determine the project root: {0}")]
    Root(#[source] RuntimeError),
}

/// Inputs for [`split`].
#[derive(Debug, Clone)]
pub struct SplitterOptions {
    /// Entry specifier, resolved against the resolver root.
    pub project_entry_point: String,
    /// Chunk name -> path pattern, first match wins.
    pub chunks: IndexMap<String, RawPattern>,
    pub resolver: ResolverOptions,
    pub build: BuildOptions,
}

impl SplitterOptions {
    pub fn new(project_entry_point: impl Into<String>, resolver: ResolverOptions) -> Self {
        Self {
            project_entry_point: project_entry_point.into(),
            chunks: IndexMap::new(),
            resolver,
            build: BuildOptions::default(),
        }
    }

    pub fn chunk(mut self, name: impl Into<String>, pattern: impl Into<RawPattern>) -> Self {
        self.chunks.insert(name.into(), pattern.into());
        self
    }

    pub fn build_options(mut self, build: BuildOptions) -> Self {
        self.build = build;
        self
    }
}

/// A finished plan: the graph and its chunk assignment.
#[derive(Debug, Clone, Serialize)]
pub struct SplitPlan {
    pub graph: ModuleGraph,
    pub assignment: ChunkAssignment,
}

/// Build the import graph for the entry point and assign its modules to chunks.
///
/// A relative resolver root is taken relative to the runtime's working
/// directory. Returns `Ok(None)` when the entry point produces no module.
pub async fn split(
    mut options: SplitterOptions,
    runtime: Arc<dyn Runtime>,
) -> Result<Option<SplitPlan>, SplitError> {
    if options.resolver.root.is_relative() {
        let cwd = runtime.get_cwd().map_err(SplitError::Root)?;
        options.resolver.root = cwd.join(&options.resolver.root);
    }

    let rules = ChunkRules::from_raw(options.chunks)?;
    let resolver = PathResolver::new(options.resolver)?;
    let root = resolver.root().to_path_buf();
    let builder = GraphBuilder::new(resolver, options.build);

    let Some(graph) = builder.build(&options.project_entry_point, runtime).await? else {
        warn!(
            entry = %options.project_entry_point,
            root = %root.display(),
            "entry point could not be resolved"
        );
        return Ok(None);
    };

    let assignment = assign_chunks(&graph, &root, &rules);
    info!(
        chunks = assignment.chunks.len(),
        unassigned = assignment.unassigned.len(),
        "chunks assigned"
    );
    Ok(Some(SplitPlan { graph, assignment }))
}
