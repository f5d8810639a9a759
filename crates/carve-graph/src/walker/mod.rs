//! Graph walker for dependency traversal.
//!
//! Starting from an entry point, each module is resolved, read, parsed and
//! then its imports are walked concurrently. Results are stored in
//! declaration order regardless of which branch finishes first.

pub mod parser;
mod traversal;

pub use parser::{ParseError, ParsedExport, ParsedImport, ParsedModule, ParserPlugin, parse_module};

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::graph::ModuleGraph;
use crate::import::ImportOutcome;
use crate::resolver::PathResolver;
use crate::runtime::{Runtime, RuntimeError};

/// Default maximum import depth.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Default maximum number of modules in one graph.
pub const DEFAULT_MAX_MODULES: usize = 100_000;

/// Maximum size of a single module source.
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Error that can occur while building a graph.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read file '{}': {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: RuntimeError,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Failed to resolve module '{specifier}' from '{}': {source}", from.display())]
    ResolutionFailed {
        specifier: String,
        from: PathBuf,
        #[source]
        source: RuntimeError,
    },

    #[error("Maximum depth exceeded: {depth} (max: {max})")]
    MaxDepthExceeded { depth: usize, max: usize },

    #[error("Too many modules processed: {count} modules (max: {max} allowed)")]
    TooManyModules { count: usize, max: usize },

    #[error("File too large: {} is {size} bytes (max: {max} bytes)", path.display())]
    FileTooLarge { path: PathBuf, size: usize, max: usize },
}

/// Knobs for a graph build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Parser syntax extensions.
    pub plugins: Vec<ParserPlugin>,

    /// Treat `export .. from '...'` as an edge and walk it.
    pub follow_re_exports: bool,

    pub max_depth: usize,

    pub max_modules: usize,

    /// Per-module read timeout. `None` waits indefinitely.
    pub read_timeout: Option<Duration>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            plugins: Vec::new(),
            follow_re_exports: true,
            max_depth: DEFAULT_MAX_DEPTH,
            max_modules: DEFAULT_MAX_MODULES,
            read_timeout: None,
        }
    }
}

impl BuildOptions {
    pub fn plugins(mut self, plugins: impl IntoIterator<Item = ParserPlugin>) -> Self {
        self.plugins = plugins.into_iter().collect();
        self
    }

    pub fn follow_re_exports(mut self, follow: bool) -> Self {
        self.follow_re_exports = follow;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_modules(mut self, max_modules: usize) -> Self {
        self.max_modules = max_modules;
        self
    }

    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }
}

/// Builds a [`ModuleGraph`] from an entry point.
#[derive(Debug)]
pub struct GraphBuilder {
    resolver: PathResolver,
    options: BuildOptions,
}

impl GraphBuilder {
    pub fn new(resolver: PathResolver, options: BuildOptions) -> Self {
        Self { resolver, options }
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Walk the import graph starting at `entry`.
    ///
    /// `entry` is resolved like a bare specifier, i.e. against the resolver
    /// root. Returns `Ok(None)` when the entry itself is ignored, missing,
    /// unsupported or timed out.
    pub async fn build(
        &self,
        entry: &str,
        runtime: Arc<dyn Runtime>,
    ) -> Result<Option<ModuleGraph>, BuildError> {
        let traversal = traversal::Traversal::new(&self.resolver, &self.options, runtime.as_ref());
        let outcome = traversal.visit(entry, None, 0).await?;

        match outcome {
            ImportOutcome::Resolved { module } => {
                let graph = traversal.finish(module);
                info!(
                    entry,
                    modules = graph.len(),
                    "import graph built"
                );
                Ok(Some(graph))
            }
            ImportOutcome::Skipped { reason } => {
                info!(entry, %reason, "entry point produced no module");
                Ok(None)
            }
        }
    }
}

/// Build the import graph for `entry` with default build options.
pub async fn build_graph(
    entry: &str,
    resolver: PathResolver,
    plugins: &[ParserPlugin],
    runtime: Arc<dyn Runtime>,
) -> Result<Option<ModuleGraph>, BuildError> {
    let options = BuildOptions::default().plugins(plugins.iter().copied());
    GraphBuilder::new(resolver, options).build(entry, runtime).await
}
