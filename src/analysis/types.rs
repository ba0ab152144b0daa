//! Shared types for export analysis.
//!
//! These structures describe exported declarations at two stages: the
//! intermediate [`TracedExport`] edges produced while following re-export
//! chains, and the finished [`ExportedSymbol`] records that coverage
//! statistics are computed from.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Categorizes what kind of declaration an export refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    /// `function` and `async function` declarations.
    Function,
    /// `class` and `abstract class` declarations.
    Class,
    /// `interface` declarations.
    Interface,
    /// `type` alias declarations.
    Type,
    /// `const` bindings.
    Const,
    /// `let`/`var` bindings, anonymous default exports and export lists.
    Variable,
    /// `enum` and `const enum` declarations.
    Enum,
}

impl SymbolKind {
    /// Returns a short label for the kind.
    pub fn label(&self) -> &'static str {
        match self {
            SymbolKind::Function => "function",
            SymbolKind::Class => "class",
            SymbolKind::Interface => "interface",
            SymbolKind::Type => "type",
            SymbolKind::Const => "const",
            SymbolKind::Variable => "variable",
            SymbolKind::Enum => "enum",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a symbol is exposed to consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    /// `export const foo`, `export { foo }`
    #[default]
    Named,
    /// `export default ...` or `export { foo as default }`
    Default,
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportKind::Named => write!(f, "named"),
            ExportKind::Default => write!(f, "default"),
        }
    }
}

/// One resolved, documentable unit of a module's public surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedSymbol {
    /// Identifier as seen by a consumer (after any `as` rename).
    pub name: String,
    /// Declaration kind.
    pub kind: SymbolKind,
    /// File containing the actual declaration.
    pub source_file: PathBuf,
    /// 1-based line of the declaration in `source_file`.
    pub line: usize,
    /// Whether a documentation block is attached to the declaration.
    pub has_documentation: bool,
    /// Raw text of the attached documentation block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    /// Named or default export.
    pub export_kind: ExportKind,
}

/// An edge in the re-export graph: a name exported by some file, resolved
/// to the file and line where it is declared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TracedExport {
    /// Name at the declaration site.
    pub original_name: String,
    /// Name under which the export is visible to consumers.
    pub exported_name: String,
    /// File holding the declaration (or the re-export statement, as a fallback).
    pub source_file: PathBuf,
    /// 1-based line in `source_file`.
    pub line: usize,
}

impl TracedExport {
    /// Creates a traced export whose original and exported names match.
    pub fn direct(name: impl Into<String>, source_file: impl Into<PathBuf>, line: usize) -> Self {
        let name = name.into();
        Self {
            original_name: name.clone(),
            exported_name: name,
            source_file: source_file.into(),
            line,
        }
    }
}
