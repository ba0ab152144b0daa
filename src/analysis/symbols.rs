//! Building finished symbol records from traced exports.

use tracing::debug;

use super::classify::{
    classify_export_line, join_braced_statement, parse_declaration, STATEMENT_LOOKAHEAD,
};
use super::docs::DocMap;
use super::types::{ExportKind, ExportedSymbol, SymbolKind, TracedExport};

/// Returns the declaration starting at 0-based `index`, joined with up to
/// [`STATEMENT_LOOKAHEAD`] following lines until one contains `{` or `;`.
pub fn declaration_text(lines: &[&str], index: usize) -> Option<String> {
    let first = lines.get(index)?.trim();
    let mut text = first.to_string();
    if first.contains('{') || first.contains(';') {
        return Some(text);
    }

    for line in lines.iter().skip(index + 1).take(STATEMENT_LOOKAHEAD) {
        let trimmed = line.trim();
        text.push(' ');
        text.push_str(trimmed);
        if trimmed.contains('{') || trimmed.contains(';') {
            break;
        }
    }

    Some(text)
}

/// Builds the symbol record for a traced export.
///
/// `lines` and `docs` belong to `traced.source_file`. Kind comes from the
/// declaration found at the traced line; the name is always the exported
/// one. A traced line that holds an export list naming the symbol yields a
/// `variable`, since lists carry no kind information. Returns `None` when
/// the line matches neither.
pub fn synthesize(traced: &TracedExport, lines: &[&str], docs: &DocMap) -> Option<ExportedSymbol> {
    let index = traced.line.checked_sub(1)?;
    let text = declaration_text(lines, index)?;

    let (kind, export_kind) = match parse_declaration(&text) {
        Some(decl) => (decl.kind, decl.export_kind),
        None => {
            let (statement, _) = join_braced_statement(lines, index);
            let listed = classify_export_line(&statement).is_some_and(|line| {
                line.specifiers().iter().any(|spec| {
                    spec.exported == traced.exported_name || spec.original == traced.original_name
                })
            });
            if !listed {
                debug!(
                    file = %traced.source_file.display(),
                    line = traced.line,
                    name = %traced.exported_name,
                    "no declaration at traced line, dropping symbol"
                );
                return None;
            }
            (SymbolKind::Variable, ExportKind::Named)
        }
    };

    let export_kind = if traced.exported_name == "default" {
        ExportKind::Default
    } else {
        export_kind
    };
    let documentation = docs.get(&index).cloned();

    Some(ExportedSymbol {
        name: traced.exported_name.clone(),
        kind,
        source_file: traced.source_file.clone(),
        line: traced.line,
        has_documentation: documentation.is_some(),
        documentation,
        export_kind,
    })
}
