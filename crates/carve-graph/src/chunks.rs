//! Chunk assignment: group graph modules under named chunks by path pattern.

use std::path::{Component, Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;

use crate::graph::ModuleGraph;
use crate::pattern::{Pattern, PatternError, RawPattern, normalize_pattern};

/// Ordered chunk name -> path pattern rules.
#[derive(Debug, Clone, Default)]
pub struct ChunkRules {
    rules: IndexMap<String, Pattern>,
}

impl ChunkRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a chunk rule. Declaration order is kept.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        pattern: impl Into<RawPattern>,
    ) -> Result<&mut Self, PatternError> {
        self.rules.insert(name.into(), normalize_pattern(pattern)?);
        Ok(self)
    }

    pub fn from_raw<I, N, P>(rules: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = (N, P)>,
        N: Into<String>,
        P: Into<RawPattern>,
    {
        let mut chunk_rules = Self::new();
        for (name, pattern) in rules {
            chunk_rules.insert(name, pattern)?;
        }
        Ok(chunk_rules)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Pattern)> {
        self.rules.iter().map(|(name, pattern)| (name.as_str(), pattern))
    }

    /// First chunk whose pattern matches any of `forms`.
    pub fn chunk_for(&self, forms: &[&str]) -> Option<&str> {
        self.rules
            .iter()
            .find(|(_, pattern)| forms.iter().any(|form| pattern.is_match(form)))
            .map(|(name, _)| name.as_str())
    }
}

/// Modules grouped by chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChunkAssignment {
    /// Every declared chunk, in declaration order, with its modules in graph
    /// order. Chunks no module matched are present and empty.
    pub chunks: IndexMap<String, Vec<PathBuf>>,
    /// Modules no rule matched.
    pub unassigned: Vec<PathBuf>,
}

impl ChunkAssignment {
    pub fn chunk(&self, name: &str) -> Option<&[PathBuf]> {
        self.chunks.get(name).map(Vec::as_slice)
    }

    pub fn chunk_of(&self, path: &Path) -> Option<&str> {
        self.chunks
            .iter()
            .find(|(_, paths)| paths.iter().any(|p| p == path))
            .map(|(name, _)| name.as_str())
    }
}

/// Place every module of `graph` into the first chunk whose pattern matches.
///
/// Each module is tested in two forms: its canonical path and, when it lives
/// under `root`, a `./`-prefixed root-relative path with `/` separators.
pub fn assign_chunks(graph: &ModuleGraph, root: &Path, rules: &ChunkRules) -> ChunkAssignment {
    let mut assignment = ChunkAssignment {
        chunks: rules
            .iter()
            .map(|(name, _)| (name.to_string(), Vec::new()))
            .collect(),
        unassigned: Vec::new(),
    };

    for module in graph.modules() {
        let canonical = module.path.to_string_lossy();
        let relative = relative_form(&module.path, root);
        let forms: Vec<&str> = std::iter::once(&*canonical)
            .chain(relative.as_deref())
            .collect();

        match rules.chunk_for(&forms) {
            Some(name) => {
                if let Some(paths) = assignment.chunks.get_mut(name) {
                    paths.push(module.path.clone());
                }
            }
            None => assignment.unassigned.push(module.path.clone()),
        }
    }

    assignment
}

/// `./src/a.ts` for `/project/src/a.ts` under `/project`.
fn relative_form(path: &Path, root: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    Some(format!("./{}", parts.join("/")))
}
