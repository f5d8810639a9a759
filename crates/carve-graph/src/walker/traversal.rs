//! Concurrent depth-first traversal.
//!
//! Every import of a module is walked at the same time with `try_join_all`,
//! which yields outcomes in the order the futures were created. That keeps
//! each module's import list in source order no matter which branch settles
//! first. The first error cancels the remaining branches.

use std::path::{Path, PathBuf};

use futures::future::{BoxFuture, FutureExt, try_join_all};
use indexmap::IndexMap;
use parking_lot::Mutex;
use tracing::{debug, warn};

use super::parser::parse_module;
use super::{BuildError, BuildOptions, MAX_FILE_SIZE};
use crate::export::{ExportStatement, ReExport};
use crate::graph::ModuleGraph;
use crate::import::{ImportOutcome, ImportStatement};
use crate::module::{ModuleId, ModuleNode};
use crate::resolver::{PathResolver, ResolveResult, SkipReason};
use crate::runtime::{Runtime, RuntimeError};

enum Reservation {
    New(ModuleId),
    Existing(ModuleId),
}

/// Traversal state for a single build.
pub(super) struct Traversal<'a> {
    resolver: &'a PathResolver,
    options: &'a BuildOptions,
    runtime: &'a dyn Runtime,
    /// Canonical path -> node. Index in the map is the module id.
    modules: Mutex<IndexMap<PathBuf, ModuleNode>>,
}

impl<'a> Traversal<'a> {
    pub fn new(resolver: &'a PathResolver, options: &'a BuildOptions, runtime: &'a dyn Runtime) -> Self {
        Self {
            resolver,
            options,
            runtime,
            modules: Mutex::new(IndexMap::new()),
        }
    }

    /// Resolve `specifier` and, if it names a new module, read, parse and
    /// walk it.
    pub fn visit<'s>(
        &'s self,
        specifier: &'s str,
        importer_dir: Option<&'s Path>,
        depth: usize,
    ) -> BoxFuture<'s, Result<ImportOutcome, BuildError>> {
        async move {
            let resolved = self
                .resolver
                .resolve(specifier, importer_dir, self.runtime)
                .await
                .map_err(|source| BuildError::ResolutionFailed {
                    specifier: specifier.to_string(),
                    from: importer_dir.unwrap_or(self.resolver.root()).to_path_buf(),
                    source,
                })?;

            let path = match resolved {
                ResolveResult::Local(path) => path,
                ResolveResult::Ignored(_) => return Ok(SkipReason::Ignored.into()),
                ResolveResult::Unsupported(_) => return Ok(SkipReason::UnsupportedExtension.into()),
                ResolveResult::NotFound(path) => {
                    debug!(specifier, path = %path.display(), "unresolved import");
                    return Ok(SkipReason::NotFound.into());
                }
            };

            if let Some(id) = self.lookup(&path) {
                return Ok(id.into());
            }

            if depth > self.options.max_depth {
                return Err(BuildError::MaxDepthExceeded {
                    depth,
                    max: self.options.max_depth,
                });
            }

            let Some(source) = self.read_source(&path).await? else {
                warn!(path = %path.display(), "module read timed out");
                return Ok(SkipReason::TimedOut.into());
            };
            let parsed = parse_module(&path, &source, &self.options.plugins)?;

            let id = match self.reserve(&path)? {
                Reservation::New(id) => id,
                Reservation::Existing(id) => return Ok(id.into()),
            };
            debug!(
                id = %id,
                path = %path.display(),
                imports = parsed.imports.len(),
                exports = parsed.exports.len(),
                "module parsed"
            );

            let dir = path.parent().unwrap_or(self.resolver.root());
            let follow = self.options.follow_re_exports;
            let outcomes = {
                let edges = parsed
                    .imports
                    .iter()
                    .map(|import| import.source.as_str())
                    .chain(
                        parsed
                            .exports
                            .iter()
                            .filter(|_| follow)
                            .filter_map(|export| export.source.as_deref()),
                    );
                try_join_all(edges.map(|edge| self.visit(edge, Some(dir), depth + 1))).await?
            };

            let mut outcomes = outcomes.into_iter();
            let imports = parsed
                .imports
                .into_iter()
                .zip(outcomes.by_ref())
                .map(|(import, outcome)| ImportStatement {
                    source: import.source,
                    names: import.names,
                    type_only: import.type_only,
                    outcome,
                })
                .collect();
            let exports = parsed
                .exports
                .into_iter()
                .map(|export| ExportStatement {
                    names: export.names,
                    re_export: export.source.map(|source| ReExport {
                        source,
                        outcome: if follow { outcomes.next() } else { None },
                    }),
                })
                .collect();

            self.complete(id, imports, exports);
            Ok(id.into())
        }
        .boxed()
    }

    pub fn finish(self, root: ModuleId) -> ModuleGraph {
        ModuleGraph::from_parts(self.modules.into_inner(), root)
    }

    fn lookup(&self, path: &Path) -> Option<ModuleId> {
        self.modules
            .lock()
            .get_index_of(path)
            .map(ModuleId::from_index)
    }

    /// Claim an id for `path`. A concurrent branch may have claimed it
    /// between lookup and here.
    fn reserve(&self, path: &Path) -> Result<Reservation, BuildError> {
        let mut modules = self.modules.lock();
        if let Some(index) = modules.get_index_of(path) {
            return Ok(Reservation::Existing(ModuleId::from_index(index)));
        }
        if modules.len() >= self.options.max_modules {
            return Err(BuildError::TooManyModules {
                count: modules.len(),
                max: self.options.max_modules,
            });
        }

        let id = ModuleId::from_index(modules.len());
        modules.insert(path.to_path_buf(), ModuleNode::new(id, path.to_path_buf()));
        Ok(Reservation::New(id))
    }

    fn complete(&self, id: ModuleId, imports: Vec<ImportStatement>, exports: Vec<ExportStatement>) {
        let mut modules = self.modules.lock();
        if let Some((_, node)) = modules.get_index_mut(id.index()) {
            node.imports = imports;
            node.exports = exports;
        }
    }

    /// Read a module, honoring the read timeout. `Ok(None)` means timed out.
    async fn read_source(&self, path: &Path) -> Result<Option<String>, BuildError> {
        match self.options.read_timeout {
            Some(limit) => match tokio::time::timeout(limit, self.read_checked(path)).await {
                Ok(result) => result.map(Some),
                Err(_) => Ok(None),
            },
            None => self.read_checked(path).await.map(Some),
        }
    }

    /// Read a file with size validation.
    async fn read_checked(&self, path: &Path) -> Result<String, BuildError> {
        if let Ok(metadata) = self.runtime.metadata(path).await {
            if metadata.size > MAX_FILE_SIZE as u64 {
                return Err(BuildError::FileTooLarge {
                    path: path.to_path_buf(),
                    size: metadata.size as usize,
                    max: MAX_FILE_SIZE,
                });
            }
        }

        let bytes = self
            .runtime
            .read_file(path)
            .await
            .map_err(|source| BuildError::ReadFile {
                path: path.to_path_buf(),
                source,
            })?;

        // Metadata may be unavailable on some runtimes.
        if bytes.len() > MAX_FILE_SIZE {
            return Err(BuildError::FileTooLarge {
                path: path.to_path_buf(),
                size: bytes.len(),
                max: MAX_FILE_SIZE,
            });
        }

        String::from_utf8(bytes).map_err(|e| BuildError::ReadFile {
            path: path.to_path_buf(),
            source: RuntimeError::Other(format!("Invalid UTF-8: {e}")),
        })
    }
}
