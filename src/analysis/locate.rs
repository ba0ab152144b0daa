//! Declaration lookup by symbol name.

use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::debug;

use super::classify::{classify_export_line, ExportLine};
use super::types::ExportKind;

/// Builds the bare-declaration matcher for `name`.
///
/// The name must be followed by a non-identifier character so that
/// `Server` never matches `ServerRateLimitDescription`.
fn bare_declaration_pattern(name: &str) -> Option<Regex> {
    let pattern = format!(
        r"^(?:export\s+)?(?:default\s+)?(?:declare\s+)?(?:async\s+)?(?:abstract\s+)?(?:class|function\s*\*?|interface|type|const\s+enum|enum|const|let|var)\s+{}(?:[^\w$]|$)",
        regex::escape(name)
    );
    Regex::new(&pattern).ok()
}

/// Finds the 1-based line declaring `name` within already-split lines.
///
/// An `export` declaration of the name wins over a bare declaration; among
/// each category the first occurrence wins. The name `default` resolves to
/// the module's `export default` statement.
pub fn locate_in_lines(lines: &[&str], name: &str) -> Option<usize> {
    if name == "default" {
        return locate_default_export(lines);
    }

    let pattern = bare_declaration_pattern(name)?;
    let mut first_bare = None;

    for (idx, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if let Some(ExportLine::Declaration(decl)) = classify_export_line(trimmed) {
            if decl.name == name {
                return Some(idx + 1);
            }
        }
        if first_bare.is_none() && pattern.is_match(trimmed) {
            first_bare = Some(idx + 1);
        }
    }

    first_bare
}

/// Finds the 1-based line declaring `name` in the file at `path`.
///
/// Unreadable files yield `None`, like a missing declaration.
pub fn locate_declaration(path: &Path, name: &str) -> Option<usize> {
    match fs::read_to_string(path) {
        Ok(content) => {
            let lines: Vec<&str> = content.lines().collect();
            locate_in_lines(&lines, name)
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "cannot read file for declaration lookup");
            None
        }
    }
}

/// Finds the 1-based line of the first `export default` statement.
pub fn locate_default_export(lines: &[&str]) -> Option<usize> {
    lines
        .iter()
        .position(|line| {
            matches!(
                classify_export_line(line.trim()),
                Some(ExportLine::Declaration(ref decl))
                    if decl.export_kind == ExportKind::Default
            )
        })
        .map(|idx| idx + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_exported_declaration() {
        let lines = vec!["import x from './x';", "", "export function target() {}"];
        assert_eq!(locate_in_lines(&lines, "target"), Some(3));
    }

    #[test]
    fn test_bare_declaration() {
        let lines = vec!["const helper = 1;", "function target() {}", "export { target };"];
        assert_eq!(locate_in_lines(&lines, "target"), Some(2));
        assert_eq!(locate_in_lines(&lines, "helper"), Some(1));
    }

    #[test]
    fn test_export_preferred_over_bare() {
        let lines = vec!["const target = 1;", "export const target = 2;"];
        assert_eq!(locate_in_lines(&lines, "target"), Some(2));
    }

    #[test]
    fn test_word_boundary() {
        let lines = vec![
            "export type ServerRateLimitDescription = {",
            "  limit: number;",
            "};",
            "export type Server = {",
            "  port: number;",
            "};",
        ];
        assert_eq!(locate_in_lines(&lines, "Server"), Some(4));
        assert_eq!(locate_in_lines(&lines, "ServerRateLimitDescription"), Some(1));

        let bare = vec!["type ServerOptions = {};", "type Server = {};"];
        assert_eq!(locate_in_lines(&bare, "Server"), Some(2));
    }

    #[test]
    fn test_not_found() {
        let lines = vec!["export const other = 1;"];
        assert_eq!(locate_in_lines(&lines, "missing"), None);
    }

    #[test]
    fn test_dollar_names() {
        let lines = vec!["const $store = {};", "const $storeExtra = {};"];
        assert_eq!(locate_in_lines(&lines, "$store"), Some(1));
        assert_eq!(locate_in_lines(&lines, "$storeExtra"), Some(2));
    }

    #[test]
    fn test_locate_default_export() {
        let lines = vec!["const a = 1;", "export default class App {}"];
        assert_eq!(locate_default_export(&lines), Some(2));
        assert_eq!(locate_default_export(&lines[..1]), None);
        assert_eq!(locate_in_lines(&lines, "default"), Some(2));
    }

    #[test]
    fn test_locate_declaration_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "// header").unwrap();
        writeln!(file, "export interface Options {{}}").unwrap();

        assert_eq!(locate_declaration(file.path(), "Options"), Some(2));
        assert_eq!(
            locate_declaration(Path::new("/definitely/missing.ts"), "Options"),
            None
        );
    }
}
