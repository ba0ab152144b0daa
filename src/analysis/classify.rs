//! Line classification for export, import and declaration statements.
//!
//! Classification is heuristic: each function looks at a single trimmed
//! line (or a short joined statement) and matches a narrow set of idiomatic
//! forms. Anything that does not match is "not an export", never an error.

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::{ExportKind, SymbolKind};

/// Maximum number of following lines joined into a single statement.
pub const STATEMENT_LOOKAHEAD: usize = 10;

static DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(export\s+)?(default\s+)?(?:declare\s+)?(async\s+function(?:\s*\*\s*|\s+)|function(?:\s*\*\s*|\s+)|abstract\s+class\s+|class\s+|interface\s+|type\s+|const\s+enum\s+|enum\s+|const\s+|let\s+|var\s+)([A-Za-z_$][\w$]*)",
    )
    .expect("declaration pattern must compile")
});

static DEFAULT_EXPORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^export\s+default\b(.*)$").expect("default pattern must compile"));

static DEFAULT_TARGET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(function|class)\b\s*\*?\s*([A-Za-z_$][\w$]*)?")
        .expect("default target pattern must compile")
});

static STAR_EXPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^export\s+\*\s+from\s+["']([^"']+)["']"#).expect("star pattern must compile")
});

static LIST_EXPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^export\s+(type\s+)?\{([^}]*)\}\s*(?:from\s+["']([^"']+)["'])?"#)
        .expect("list pattern must compile")
});

static IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^import\s+(?:type\s+)?(.+?)\s+from\s+["']([^"']+)["']"#)
        .expect("import pattern must compile")
});

/// A declaration recovered from a line of source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Declaration kind.
    pub kind: SymbolKind,
    /// Declared identifier, or `default` for anonymous default exports.
    pub name: String,
    /// Named or default export.
    pub export_kind: ExportKind,
    /// Whether the line carries the `export` keyword.
    pub exported: bool,
}

/// One `name` or `name as alias` entry of an export list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSpecifier {
    /// Name inside the module that declares or imports it.
    pub original: String,
    /// Name visible to consumers.
    pub exported: String,
}

impl ExportSpecifier {
    pub fn new(original: impl Into<String>, exported: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            exported: exported.into(),
        }
    }
}

/// The export forms recognized on a single statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportLine {
    /// `export function foo`, `export const bar`, `export default ...`
    Declaration(Declaration),
    /// `export { a, b as c }` with no `from` clause.
    List(Vec<ExportSpecifier>),
    /// `export type { A, B }` with no `from` clause.
    TypeList(Vec<ExportSpecifier>),
    /// `export { a } from "./mod"` or `export type { A } from "./mod"`.
    ReExport {
        specifiers: Vec<ExportSpecifier>,
        module: String,
        type_only: bool,
    },
    /// `export * from "./mod"`
    Star { module: String },
}

impl ExportLine {
    /// Returns the specifiers of a list form, if any.
    pub fn specifiers(&self) -> &[ExportSpecifier] {
        match self {
            ExportLine::List(specifiers)
            | ExportLine::TypeList(specifiers)
            | ExportLine::ReExport { specifiers, .. } => specifiers,
            ExportLine::Declaration(_) | ExportLine::Star { .. } => &[],
        }
    }
}

/// An individual binding within an import statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportSpecifier {
    /// Default import: `import foo from './mod'`
    Default(String),
    /// Named import: `import { foo }` or `import { foo as bar }`
    Named { imported: String, local: String },
    /// Namespace import: `import * as foo from './mod'`
    Namespace(String),
}

impl ImportSpecifier {
    /// Returns the name exported by the source module, or None for namespaces.
    pub fn exported_name(&self) -> Option<&str> {
        match self {
            ImportSpecifier::Default(_) => Some("default"),
            ImportSpecifier::Named { imported, .. } => Some(imported),
            ImportSpecifier::Namespace(_) => None,
        }
    }

    /// Returns the local name (the name used in the importing file).
    pub fn local_name(&self) -> &str {
        match self {
            ImportSpecifier::Default(name) => name,
            ImportSpecifier::Named { local, .. } => local,
            ImportSpecifier::Namespace(name) => name,
        }
    }
}

/// A parsed `import ... from "..."` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// Module specifier as written.
    pub source: String,
    /// Bindings introduced by the statement.
    pub specifiers: Vec<ImportSpecifier>,
}

impl Import {
    /// Finds the binding that introduces `local` into the importing file.
    pub fn binding(&self, local: &str) -> Option<&ImportSpecifier> {
        self.specifiers.iter().find(|s| s.local_name() == local)
    }
}

/// Parses a declaration, exported or not, from the start of `text`.
///
/// Handles `export`, `export default`, `declare`, `async` and `abstract`
/// prefixes. Anonymous default exports are named `default`.
pub fn parse_declaration(text: &str) -> Option<Declaration> {
    let text = text.trim_start();

    if let Some(caps) = DECLARATION.captures(text) {
        let keyword = caps.get(3).map_or("", |m| m.as_str());
        let name = caps.get(4).map_or("", |m| m.as_str());
        let is_default = caps.get(2).is_some();
        // `export default type` / `export default const` are not declarations
        let invalid_default = is_default
            && (matches!(keyword_kind(keyword), SymbolKind::Const | SymbolKind::Type)
                || matches!(name, "extends" | "implements"));
        if !invalid_default {
            return Some(Declaration {
                kind: keyword_kind(keyword),
                name: name.to_string(),
                export_kind: if is_default {
                    ExportKind::Default
                } else {
                    ExportKind::Named
                },
                exported: caps.get(1).is_some(),
            });
        }
    }

    let rest = DEFAULT_EXPORT.captures(text)?.get(1)?.as_str();
    let (kind, name) = match DEFAULT_TARGET.captures(rest) {
        Some(target) => {
            let kind = if &target[1] == "class" {
                SymbolKind::Class
            } else {
                SymbolKind::Function
            };
            let name = target
                .get(2)
                .map(|m| m.as_str())
                .filter(|n| !matches!(*n, "extends" | "implements"))
                .unwrap_or("default");
            (kind, name.to_string())
        }
        None => (SymbolKind::Variable, "default".to_string()),
    };

    Some(Declaration {
        kind,
        name,
        export_kind: ExportKind::Default,
        exported: true,
    })
}

fn keyword_kind(keyword: &str) -> SymbolKind {
    let first = keyword.split_whitespace().next().unwrap_or("");
    match first {
        "function" | "async" => SymbolKind::Function,
        "abstract" | "class" => SymbolKind::Class,
        "interface" => SymbolKind::Interface,
        "type" => SymbolKind::Type,
        "enum" => SymbolKind::Enum,
        "const" if keyword.contains("enum") => SymbolKind::Enum,
        "const" => SymbolKind::Const,
        // `function*` keeps the star glued to the keyword
        kw if kw.starts_with("function") => SymbolKind::Function,
        _ => SymbolKind::Variable,
    }
}

/// Classifies a trimmed line as one of the recognized export forms.
///
/// Returns `None` for anything that is not an export statement, including
/// bare (non-exported) declarations.
pub fn classify_export_line(trimmed: &str) -> Option<ExportLine> {
    if !trimmed.starts_with("export") {
        return None;
    }

    if let Some(caps) = STAR_EXPORT.captures(trimmed) {
        return Some(ExportLine::Star {
            module: caps[1].to_string(),
        });
    }

    if let Some(caps) = LIST_EXPORT.captures(trimmed) {
        let type_only = caps.get(1).is_some();
        let specifiers = parse_specifiers(&caps[2]);
        return Some(match caps.get(3) {
            Some(module) => ExportLine::ReExport {
                specifiers,
                module: module.as_str().to_string(),
                type_only,
            },
            None if type_only => ExportLine::TypeList(specifiers),
            None => ExportLine::List(specifiers),
        });
    }

    parse_declaration(trimmed)
        .filter(|decl| decl.exported)
        .map(ExportLine::Declaration)
}

/// Returns true if the line starts a declaration, exported or bare.
pub fn is_declaration_line(trimmed: &str) -> bool {
    classify_export_line(trimmed).is_some() || parse_declaration(trimmed).is_some()
}

/// Splits the inside of `{ ... }` into specifiers.
///
/// Inline `type` modifiers are dropped: `{ type Foo as Bar }` yields
/// `Foo -> Bar`.
pub fn parse_specifiers(list: &str) -> Vec<ExportSpecifier> {
    list.split(',')
        .filter_map(|item| {
            let item = item.split_whitespace().collect::<Vec<_>>().join(" ");
            let item = item.strip_prefix("type ").unwrap_or(&item).trim();
            if item.is_empty() {
                return None;
            }
            Some(match item.split_once(" as ") {
                Some((original, exported)) => {
                    ExportSpecifier::new(original.trim(), exported.trim())
                }
                None => ExportSpecifier::new(item, item),
            })
        })
        .collect()
}

/// Parses an `import ... from "..."` statement.
pub fn parse_import(trimmed: &str) -> Option<Import> {
    let caps = IMPORT.captures(trimmed)?;
    let clause = caps[1].trim();
    let mut specifiers = Vec::new();

    let (head, named) = match clause.find('{') {
        Some(open) => {
            let close = clause[open..].find('}').map_or(clause.len(), |c| open + c);
            (&clause[..open], Some(&clause[open + 1..close]))
        }
        None => (clause, None),
    };

    for part in head.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if let Some(ns) = part.strip_prefix('*') {
            let ns = ns.trim_start().strip_prefix("as").unwrap_or(ns).trim();
            if !ns.is_empty() {
                specifiers.push(ImportSpecifier::Namespace(ns.to_string()));
            }
        } else {
            specifiers.push(ImportSpecifier::Default(part.to_string()));
        }
    }

    if let Some(named) = named {
        for spec in parse_specifiers(named) {
            specifiers.push(ImportSpecifier::Named {
                imported: spec.original,
                local: spec.exported,
            });
        }
    }

    Some(Import {
        source: caps[2].to_string(),
        specifiers,
    })
}

/// Returns true if the line opens an `export { ... }` or `export type { ... }` list.
pub fn starts_export_list(trimmed: &str) -> bool {
    let Some(rest) = trimmed.strip_prefix("export") else {
        return false;
    };
    let rest = rest.trim_start();
    let rest = rest.strip_prefix("type").map_or(rest, str::trim_start);
    rest.starts_with('{')
}

/// Joins a statement whose `{ ... }` list spans several lines.
///
/// Lines are appended until one contains the closing brace, reading at
/// most [`STATEMENT_LOOKAHEAD`] extra lines. Returns the joined text and
/// the number of lines it covers.
pub fn join_braced_statement(lines: &[&str], start: usize) -> (String, usize) {
    let first = lines[start].trim();
    if !first.contains('{') || first.contains('}') {
        return (first.to_string(), 1);
    }

    let mut joined = first.to_string();
    let end = (start + 1 + STATEMENT_LOOKAHEAD).min(lines.len());
    for (offset, line) in lines[start + 1..end].iter().enumerate() {
        joined.push(' ');
        joined.push_str(line.trim());
        if line.contains('}') {
            return (joined, offset + 2);
        }
    }
    (joined, end - start)
}
