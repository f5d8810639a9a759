use serde::{Deserialize, Serialize};

use crate::module::ModuleId;
use crate::resolver::SkipReason;

/// A binding pulled in by an import statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum ImportedName {
    /// `import x from '...'`
    Default,
    /// `import * as ns from '...'`
    Namespace,
    /// `import { a } from '...'` or `import { a as b } from '...'` (records `a`)
    Named(String),
}

impl ImportedName {
    /// Name as it appears in the exporting module.
    pub fn as_export_name(&self) -> &str {
        match self {
            ImportedName::Default => "default",
            ImportedName::Namespace => "*",
            ImportedName::Named(name) => name,
        }
    }
}

/// Where an import edge ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum ImportOutcome {
    /// The specifier resolved to a module in the graph.
    Resolved { module: ModuleId },
    /// The specifier was left out of the graph.
    Skipped { reason: SkipReason },
}

impl ImportOutcome {
    pub fn target(&self) -> Option<ModuleId> {
        match self {
            ImportOutcome::Resolved { module } => Some(*module),
            ImportOutcome::Skipped { .. } => None,
        }
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            ImportOutcome::Resolved { .. } => None,
            ImportOutcome::Skipped { reason } => Some(*reason),
        }
    }
}

impl From<ModuleId> for ImportOutcome {
    fn from(module: ModuleId) -> Self {
        ImportOutcome::Resolved { module }
    }
}

impl From<SkipReason> for ImportOutcome {
    fn from(reason: SkipReason) -> Self {
        ImportOutcome::Skipped { reason }
    }
}

/// One import declaration of a module, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportStatement {
    /// The specifier exactly as written.
    pub source: String,
    /// Imported bindings. Empty for `import './side-effect'`.
    pub names: Vec<ImportedName>,
    /// `import type { .. }` in TypeScript.
    pub type_only: bool,
    pub outcome: ImportOutcome,
}

impl ImportStatement {
    /// The module this import resolved to, if any.
    pub fn target(&self) -> Option<ModuleId> {
        self.outcome.target()
    }

    pub fn is_side_effect_only(&self) -> bool {
        self.names.is_empty()
    }

    pub fn is_namespace(&self) -> bool {
        self.names.contains(&ImportedName::Namespace)
    }
}
