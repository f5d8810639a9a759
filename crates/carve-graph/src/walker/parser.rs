//! Module parsing: source text -> import and export declarations.
//!
//! Only top-level module declarations are collected. Dynamic `import()` calls
//! and `require` are not graph edges.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    Declaration, ExportNamedDeclaration, ImportDeclaration, ImportDeclarationSpecifier,
    ModuleDeclaration, ModuleExportName,
};
use oxc_parser::{Parser, ParserReturn};
use oxc_span::SourceType;
use serde::{Deserialize, Serialize};

use crate::export::STAR_EXPORT;
use crate::import::ImportedName;

/// Syntax extensions enabled on top of what the file extension implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParserPlugin {
    Jsx,
    #[serde(alias = "ts")]
    TypeScript,
}

impl FromStr for ParserPlugin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jsx" => Ok(ParserPlugin::Jsx),
            "typescript" | "ts" => Ok(ParserPlugin::TypeScript),
            other => Err(format!("unknown parser plugin '{other}' (expected 'jsx' or 'typescript')")),
        }
    }
}

impl fmt::Display for ParserPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParserPlugin::Jsx => "jsx",
            ParserPlugin::TypeScript => "typescript",
        })
    }
}

/// Source could not be parsed.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Failed to parse {}: {message}", path.display())]
pub struct ParseError {
    pub path: PathBuf,
    pub message: String,
}

/// An import declaration before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedImport {
    pub source: String,
    pub names: Vec<ImportedName>,
    pub type_only: bool,
}

/// An export declaration before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedExport {
    pub names: Vec<String>,
    pub source: Option<String>,
}

/// Declarations collected from one module, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedModule {
    pub imports: Vec<ParsedImport>,
    pub exports: Vec<ParsedExport>,
}

/// Pick the oxc source type for `path`, widened by `plugins`.
///
/// Everything is parsed as an ES module, including `.cjs` files.
pub fn source_type_for(path: &Path, plugins: &[ParserPlugin]) -> SourceType {
    let mut source_type = SourceType::from_path(path)
        .unwrap_or(SourceType::mjs())
        .with_module(true);
    if plugins.contains(&ParserPlugin::TypeScript) {
        source_type = source_type.with_typescript(true);
    }
    if plugins.contains(&ParserPlugin::Jsx) {
        source_type = source_type.with_jsx(true);
    }
    source_type
}

/// Parse `source` and collect its import and export declarations.
///
/// Any syntax error fails the whole module; partial results are never returned.
pub fn parse_module(
    path: &Path,
    source: &str,
    plugins: &[ParserPlugin],
) -> Result<ParsedModule, ParseError> {
    let allocator = Allocator::default();
    let ParserReturn {
        program,
        errors,
        panicked,
        ..
    } = Parser::new(&allocator, source, source_type_for(path, plugins)).parse();

    if panicked || !errors.is_empty() {
        let message = errors
            .iter()
            .map(|error| error.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ParseError {
            path: path.to_path_buf(),
            message: if message.is_empty() {
                "parser aborted".to_string()
            } else {
                message
            },
        });
    }

    let mut module = ParsedModule::default();
    for stmt in &program.body {
        let Some(decl) = stmt.as_module_declaration() else {
            continue;
        };
        match decl {
            ModuleDeclaration::ImportDeclaration(import) => {
                module.imports.push(collect_import(import));
            }
            ModuleDeclaration::ExportDefaultDeclaration(_) => {
                module.exports.push(ParsedExport {
                    names: vec!["default".to_string()],
                    source: None,
                });
            }
            ModuleDeclaration::ExportNamedDeclaration(export) => {
                if let Some(export) = collect_named_export(export) {
                    module.exports.push(export);
                }
            }
            ModuleDeclaration::ExportAllDeclaration(all) => {
                let name = all
                    .exported
                    .as_ref()
                    .map_or_else(|| STAR_EXPORT.to_string(), export_name);
                module.exports.push(ParsedExport {
                    names: vec![name],
                    source: Some(all.source.value.to_string()),
                });
            }
            _ => {}
        }
    }

    Ok(module)
}

fn collect_import(import: &ImportDeclaration<'_>) -> ParsedImport {
    let mut names = Vec::new();
    if let Some(specifiers) = &import.specifiers {
        for spec in specifiers {
            let name = match spec {
                ImportDeclarationSpecifier::ImportDefaultSpecifier(_) => ImportedName::Default,
                ImportDeclarationSpecifier::ImportNamespaceSpecifier(_) => ImportedName::Namespace,
                ImportDeclarationSpecifier::ImportSpecifier(named) => {
                    match export_name(&named.imported).as_str() {
                        "default" => ImportedName::Default,
                        other => ImportedName::Named(other.to_string()),
                    }
                }
            };
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }

    ParsedImport {
        source: import.source.value.to_string(),
        names,
        type_only: import.import_kind.is_type(),
    }
}

fn collect_named_export(export: &ExportNamedDeclaration<'_>) -> Option<ParsedExport> {
    let mut names = Vec::new();
    let mut push = |name: String| {
        if !names.contains(&name) {
            names.push(name);
        }
    };

    if let Some(decl) = &export.declaration {
        match decl {
            Declaration::FunctionDeclaration(func) => {
                if let Some(id) = &func.id {
                    push(id.name.to_string());
                }
            }
            Declaration::ClassDeclaration(class) => {
                if let Some(id) = &class.id {
                    push(id.name.to_string());
                }
            }
            Declaration::VariableDeclaration(var) => {
                // Destructuring binds every identifier in the pattern.
                for declarator in &var.declarations {
                    for ident in declarator.id.get_binding_identifiers() {
                        push(ident.name.to_string());
                    }
                }
            }
            Declaration::TSEnumDeclaration(decl) => push(decl.id.name.to_string()),
            Declaration::TSInterfaceDeclaration(decl) => push(decl.id.name.to_string()),
            Declaration::TSTypeAliasDeclaration(decl) => push(decl.id.name.to_string()),
            _ => {}
        }
    }

    for spec in &export.specifiers {
        push(export_name(&spec.exported));
    }

    let source = export.source.as_ref().map(|src| src.value.to_string());
    // `export {}` declares nothing unless it carries a source edge.
    if names.is_empty() && source.is_none() {
        return None;
    }
    Some(ParsedExport { names, source })
}

fn export_name(name: &ModuleExportName<'_>) -> String {
    match name {
        ModuleExportName::IdentifierName(ident) => ident.name.to_string(),
        ModuleExportName::IdentifierReference(ident) => ident.name.to_string(),
        ModuleExportName::StringLiteral(lit) => lit.value.to_string(),
    }
}
