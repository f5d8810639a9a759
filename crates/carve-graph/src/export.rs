use serde::Serialize;

use crate::import::ImportOutcome;
use crate::module::ModuleId;

/// Export name used for `export * from '...'`.
pub const STAR_EXPORT: &str = "*";

/// One export declaration of a module, in source order.
///
/// `export default ..` records `"default"`. `export * from 'x'` records
/// [`STAR_EXPORT`] and `export * as ns from 'x'` records `"ns"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportStatement {
    /// Exported names, without duplicates, in declaration order.
    pub names: Vec<String>,
    /// Source specifier for `export .. from '...'`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub re_export: Option<ReExport>,
}

/// The `from '...'` half of a re-export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReExport {
    pub source: String,
    /// `None` when re-exports are recorded but not followed.
    pub outcome: Option<ImportOutcome>,
}

impl ExportStatement {
    pub fn is_re_export(&self) -> bool {
        self.re_export.is_some()
    }

    pub fn is_star(&self) -> bool {
        self.names.iter().any(|name| name == STAR_EXPORT)
    }

    /// The module a re-export resolved to, if it was followed and resolved.
    pub fn target(&self) -> Option<ModuleId> {
        self.re_export
            .as_ref()
            .and_then(|re_export| re_export.outcome)
            .and_then(|outcome| outcome.target())
    }
}
