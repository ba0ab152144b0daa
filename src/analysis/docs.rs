//! JSDoc association.
//!
//! A single forward pass collects `/** ... */` blocks and binds each one to
//! the declaration that follows it.

use std::collections::HashMap;

use super::classify::is_declaration_line;

/// Documentation text keyed by 0-based line index.
pub type DocMap = HashMap<usize, String>;

/// Extra lines after a documented declaration that share its documentation.
pub const DOC_WINDOW: usize = 5;

/// Tag marking a block as module documentation rather than symbol documentation.
pub const MODULE_TAG: &str = "@module";

fn opens_doc_block(trimmed: &str) -> bool {
    trimmed.starts_with("/**") && !trimmed.starts_with("/**/")
}

fn is_skippable(trimmed: &str) -> bool {
    trimmed.is_empty() || trimmed.starts_with("//") || trimmed.starts_with('@')
}

/// Builds the documentation map for a file.
///
/// A closed block binds to the next line that is not blank, a line comment
/// or a decorator, provided that line is a declaration. The binding covers
/// the declaration line and the [`DOC_WINDOW`] lines after it, clamped to
/// the end of the file, so a multi-line signature keeps its documentation.
/// Blocks tagged [`MODULE_TAG`] are discarded.
pub fn build_doc_map(lines: &[&str]) -> DocMap {
    let mut docs = DocMap::new();
    let mut block: Option<Vec<&str>> = None;

    for (idx, line) in lines.iter().enumerate() {
        let trimmed = line.trim();

        let closed = if let Some(acc) = block.as_mut() {
            acc.push(trimmed);
            trimmed.contains("*/")
        } else if opens_doc_block(trimmed) {
            block = Some(vec![trimmed]);
            trimmed[3..].contains("*/")
        } else {
            false
        };

        if !closed {
            continue;
        }

        let Some(text) = block.take().map(|acc| acc.join("\n")) else {
            continue;
        };
        if text.contains(MODULE_TAG) {
            continue;
        }

        let Some(target) = (idx + 1..lines.len()).find(|&i| !is_skippable(lines[i].trim())) else {
            continue;
        };
        if !is_declaration_line(lines[target].trim()) {
            continue;
        }

        let window_end = (target + DOC_WINDOW).min(lines.len() - 1);
        for bound in target..=window_end {
            docs.insert(bound, text.clone());
        }
    }

    docs
}
