//! Analysis entry point.
//!
//! A directory whose config declares `exports` is analyzed in public-API
//! mode: only symbols reachable from the entry files are reported. Any other
//! directory is scanned file by file, taking each file's own export
//! declarations and export lists at face value. A single file is traced as an entry point.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use super::classify::{
    classify_export_line, join_braced_statement, starts_export_list, ExportLine,
};
use super::discover::discover_source_files;
use super::docs::build_doc_map;
use super::error::{AnalysisError, Result};
use super::locate::locate_in_lines;
use super::resolve::normalize_path;
use super::stats::DocumentationStats;
use super::symbols::synthesize;
use super::trace::ExportTracer;
use super::types::{ExportedSymbol, TracedExport};
use crate::config::load_config;

/// How the analyzed symbols were selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMode {
    /// Symbols reachable from declared entry points.
    PublicApi,
    /// Every export of every discovered source file.
    FullScan,
}

/// The outcome of analyzing one path.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// The analyzed file or directory.
    pub path: PathBuf,
    /// Whether a config file was found and decoded.
    pub has_config: bool,
    /// Whether the config declares an `exports` field.
    pub has_exports_field: bool,
    /// The first traced entry point, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_entry_path: Option<PathBuf>,
    /// Every traced entry point.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub export_entries: Vec<PathBuf>,
    pub mode: AnalysisMode,
    /// Symbols sorted by file, line and name.
    pub symbols: Vec<ExportedSymbol>,
    pub stats: DocumentationStats,
}

impl AnalysisResult {
    fn new(
        path: &Path,
        has_config: bool,
        has_exports_field: bool,
        export_entries: Vec<PathBuf>,
        mode: AnalysisMode,
        mut symbols: Vec<ExportedSymbol>,
    ) -> Self {
        symbols.sort_by(|a, b| {
            (&a.source_file, a.line, &a.name).cmp(&(&b.source_file, b.line, &b.name))
        });
        let stats = DocumentationStats::from_symbols(&symbols);

        Self {
            path: path.to_path_buf(),
            has_config,
            has_exports_field,
            export_entry_path: export_entries.first().cloned(),
            export_entries,
            mode,
            symbols,
            stats,
        }
    }

    /// Symbols without documentation.
    pub fn undocumented(&self) -> impl Iterator<Item = &ExportedSymbol> {
        self.symbols.iter().filter(|s| !s.has_documentation)
    }
}

/// Analyzes a file or directory.
pub fn analyze_path(path: &Path) -> Result<AnalysisResult> {
    if !path.exists() {
        return Err(AnalysisError::NotFound(path.to_path_buf()));
    }

    if path.is_file() {
        let entries = vec![normalize_path(path)];
        let symbols = analyze_entries(&entries)?;
        return Ok(AnalysisResult::new(
            path,
            false,
            false,
            entries,
            AnalysisMode::PublicApi,
            symbols,
        ));
    }

    let config = load_config(path).map(|loaded| loaded.config);
    let has_config = config.is_some();

    match config.filter(|c| c.has_exports()) {
        Some(config) => {
            let entries: Vec<PathBuf> = config
                .entry_paths(path)
                .iter()
                .map(|entry| normalize_path(entry))
                .collect();
            info!(path = %path.display(), entries = entries.len(), "analyzing public API");
            let symbols = analyze_entries(&entries)?;
            Ok(AnalysisResult::new(
                path,
                has_config,
                true,
                entries,
                AnalysisMode::PublicApi,
                symbols,
            ))
        }
        None => {
            let files = discover_source_files(path)?;
            info!(path = %path.display(), files = files.len(), "scanning all source files");
            let symbols = scan_files(&files);
            Ok(AnalysisResult::new(
                path,
                has_config,
                false,
                Vec::new(),
                AnalysisMode::FullScan,
                symbols,
            ))
        }
    }
}

/// Traces `entries` and synthesizes every reachable symbol.
pub fn analyze_entries(entries: &[PathBuf]) -> Result<Vec<ExportedSymbol>> {
    let mut tracer = ExportTracer::new();
    for entry in entries {
        tracer.trace(entry)?;
    }
    debug!(files = tracer.graph().file_count(), "tracing finished");

    let traced = tracer.collect(entries.iter().map(PathBuf::as_path));
    Ok(synthesize_all(traced))
}

/// Collects each file's own exports: direct declarations and local export
/// lists. List names are located in the same file; imports are not followed.
pub fn scan_files(files: &[PathBuf]) -> Vec<ExportedSymbol> {
    let mut symbols = Vec::new();

    for file in files {
        let content = match fs::read_to_string(file) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %file.display(), error = %e, "skipping unreadable file");
                continue;
            }
        };
        let lines: Vec<&str> = content.lines().collect();
        let docs = build_doc_map(&lines);

        let mut idx = 0;
        while idx < lines.len() {
            let trimmed = lines[idx].trim();
            let (statement, consumed) = if starts_export_list(trimmed) {
                join_braced_statement(&lines, idx)
            } else {
                (trimmed.to_string(), 1)
            };

            match classify_export_line(&statement) {
                Some(ExportLine::Declaration(decl)) => {
                    let traced = TracedExport::direct(decl.name, file.clone(), idx + 1);
                    symbols.extend(synthesize(&traced, &lines, &docs));
                }
                Some(ExportLine::List(specifiers)) | Some(ExportLine::TypeList(specifiers)) => {
                    for spec in specifiers {
                        let line = locate_in_lines(&lines, &spec.original).unwrap_or(idx + 1);
                        let traced = TracedExport {
                            original_name: spec.original,
                            exported_name: spec.exported,
                            source_file: file.clone(),
                            line,
                        };
                        symbols.extend(synthesize(&traced, &lines, &docs));
                    }
                }
                _ => {}
            }

            idx += consumed;
        }
    }

    symbols
}

/// Synthesizes traced exports, reading each source file once.
fn synthesize_all(traced: Vec<TracedExport>) -> Vec<ExportedSymbol> {
    let mut order: Vec<PathBuf> = Vec::new();
    let mut by_file: HashMap<PathBuf, Vec<TracedExport>> = HashMap::new();
    for export in traced {
        let file = export.source_file.clone();
        if !by_file.contains_key(&file) {
            order.push(file.clone());
        }
        by_file.entry(file).or_default().push(export);
    }

    let mut symbols = Vec::new();
    for file in order {
        let content = match fs::read_to_string(&file) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %file.display(), error = %e, "skipping unreadable source file");
                continue;
            }
        };
        let lines: Vec<&str> = content.lines().collect();
        let docs = build_doc_map(&lines);

        for export in by_file.get(&file).into_iter().flatten() {
            symbols.extend(synthesize(export, &lines, &docs));
        }
    }

    symbols
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::SymbolKind;
    use tempfile::TempDir;

    fn write(dir: &TempDir, rel: &str, content: &str) -> PathBuf {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_path() {
        let result = analyze_path(Path::new("/definitely/not/here"));
        assert!(matches!(result, Err(AnalysisError::NotFound(_))));
    }

    #[test]
    fn test_full_scan_mode() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.ts", "/** Doc. */\nexport function a() {}\nfunction hidden() {}\n");
        write(&dir, "b.ts", "export const b = 1;\nexport { a } from './a.ts';\n");

        let result = analyze_path(dir.path()).unwrap();
        assert_eq!(result.mode, AnalysisMode::FullScan);
        assert!(!result.has_config);
        assert!(result.export_entry_path.is_none());

        let names: Vec<_> = result.symbols.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(result.stats.documented, 1);
        assert_eq!(result.undocumented().count(), 1);
    }

    #[test]
    fn test_full_scan_takes_local_export_lists() {
        let dir = TempDir::new().unwrap();
        let file = write(
            &dir,
            "mod.ts",
            "const bar = 1;\nexport type { Missing };\nexport {\n  foo,\n  bar as baz,\n};\n\n/** Doc. */\nfunction foo() {}\n",
        );

        let result = analyze_path(dir.path()).unwrap();
        assert_eq!(result.mode, AnalysisMode::FullScan);
        assert_eq!(result.stats.total, 3);
        assert_eq!(result.stats.documented, 1);

        let baz = result.symbols.iter().find(|s| s.name == "baz").unwrap();
        assert_eq!((baz.kind, baz.line), (SymbolKind::Const, 1));
        assert!(!baz.has_documentation);
        assert_eq!(baz.source_file, file);

        let foo = result.symbols.iter().find(|s| s.name == "foo").unwrap();
        assert_eq!((foo.kind, foo.line), (SymbolKind::Function, 9));
        assert!(foo.has_documentation);

        // Names without a declaration stay at the list line
        let missing = result.symbols.iter().find(|s| s.name == "Missing").unwrap();
        assert_eq!((missing.kind, missing.line), (SymbolKind::Variable, 2));
    }

    #[test]
    fn test_config_without_exports_scans() {
        let dir = TempDir::new().unwrap();
        write(&dir, "deno.json", r#"{"name": "@x/y"}"#);
        write(&dir, "mod.ts", "export enum Mode { A }\n");

        let result = analyze_path(dir.path()).unwrap();
        assert!(result.has_config);
        assert!(!result.has_exports_field);
        assert_eq!(result.mode, AnalysisMode::FullScan);
        assert_eq!(result.symbols[0].kind, SymbolKind::Enum);
    }

    #[test]
    fn test_file_root_is_traced() {
        let dir = TempDir::new().unwrap();
        let impl_file = write(&dir, "impl.ts", "/** Doc. */\nexport class Impl {}\n");
        let entry = write(&dir, "mod.ts", "export * from './impl.ts';\n");

        let result = analyze_path(&entry).unwrap();
        assert_eq!(result.mode, AnalysisMode::PublicApi);
        assert_eq!(result.export_entry_path.as_deref(), Some(entry.as_path()));
        assert_eq!(result.symbols.len(), 1);
        assert_eq!(result.symbols[0].source_file, impl_file);
        assert!(result.symbols[0].has_documentation);
    }

    #[test]
    fn test_exports_map_traces_every_entry() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "deno.jsonc",
            "{\n  // entries\n  \"exports\": { \".\": \"./mod.ts\", \"./extra\": \"./extra.ts\" },\n}\n",
        );
        write(&dir, "mod.ts", "export const main = 1;\n");
        write(&dir, "extra.ts", "export const extra = 2;\n");
        write(&dir, "internal.ts", "export const internal = 3;\n");

        let result = analyze_path(dir.path()).unwrap();
        assert!(result.has_exports_field);
        assert_eq!(result.export_entries.len(), 2);
        let mut names: Vec<_> = result.symbols.iter().map(|s| s.name.as_str()).collect();
        names.sort();
        assert_eq!(names, vec!["extra", "main"]);
    }

    #[test]
    fn test_missing_entry_is_hard_error() {
        let dir = TempDir::new().unwrap();
        write(&dir, "deno.json", r#"{"exports": "./missing.ts"}"#);

        let result = analyze_path(dir.path());
        assert!(matches!(result, Err(AnalysisError::EntryRead { .. })));
    }

    #[test]
    fn test_unreadable_source_skipped_in_synthesis() {
        let traced = vec![TracedExport::direct("gone", "/definitely/missing.ts", 1)];
        assert!(synthesize_all(traced).is_empty());
    }
}
