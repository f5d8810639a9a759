use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::export::ExportStatement;
use crate::import::ImportStatement;

/// Index of a module inside its [`ModuleGraph`](crate::ModuleGraph).
///
/// Ids are assigned in discovery order, so the entry point is always the
/// first module of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ModuleId(pub(crate) u32);

impl ModuleId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A parsed source file in the import graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleNode {
    pub id: ModuleId,
    /// Canonical path; unique within a graph.
    pub path: PathBuf,
    pub imports: Vec<ImportStatement>,
    pub exports: Vec<ExportStatement>,
}

impl ModuleNode {
    pub(crate) fn new(id: ModuleId, path: PathBuf) -> Self {
        Self {
            id,
            path,
            imports: Vec::new(),
            exports: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every exported name, flattened across export statements.
    pub fn export_names(&self) -> impl Iterator<Item = &str> {
        self.exports
            .iter()
            .flat_map(|export| export.names.iter().map(String::as_str))
    }

    /// Whether this module has no outgoing resolved edges.
    pub fn is_leaf(&self) -> bool {
        self.imports.iter().all(|import| import.target().is_none())
            && self.exports.iter().all(|export| export.target().is_none())
    }
}
