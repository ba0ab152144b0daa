//! Re-export tracing.
//!
//! Starting from an entry file, every `export` statement is followed to the
//! declaration it ultimately names: `export *` chains are flattened, renamed
//! re-exports keep their consumer-facing name, and export lists of imported
//! names are traced back through the matching `import`.
//!
//! Files are memoized in an [`ExportGraph`]. A file is marked visited before
//! its body is scanned, so circular `export *` chains terminate; a file
//! re-entered while it is still being traced contributes whatever entries it
//! has collected so far.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::classify::{
    classify_export_line, join_braced_statement, parse_import, starts_export_list, ExportLine,
    ExportSpecifier, Import,
};
use super::error::{AnalysisError, Result};
use super::locate::{locate_declaration, locate_in_lines};
use super::resolve::{normalize_path, resolve_module};
use super::types::TracedExport;

/// Per-file export tables for a single analysis run.
#[derive(Debug, Default)]
pub struct ExportGraph {
    buckets: HashMap<PathBuf, Vec<TracedExport>>,
    visited: HashSet<PathBuf>,
}

impl ExportGraph {
    /// Returns the exports recorded for `file` (empty if never traced).
    pub fn exports_of(&self, file: &Path) -> &[TracedExport] {
        self.buckets.get(file).map_or(&[], Vec::as_slice)
    }

    /// Returns true if `file` has been entered by the tracer.
    pub fn is_visited(&self, file: &Path) -> bool {
        self.visited.contains(file)
    }

    /// Number of files entered by the tracer.
    pub fn file_count(&self) -> usize {
        self.visited.len()
    }

    fn mark_visited(&mut self, file: &Path) -> bool {
        if !self.visited.insert(file.to_path_buf()) {
            return false;
        }
        self.buckets.entry(file.to_path_buf()).or_default();
        true
    }

    /// Appends `entry` to the bucket of `file` unless an entry with the same
    /// exported name and source file is already there.
    fn push(&mut self, file: &Path, entry: TracedExport) {
        let bucket = self.buckets.entry(file.to_path_buf()).or_default();
        let duplicate = bucket.iter().any(|existing| {
            existing.exported_name == entry.exported_name
                && existing.source_file == entry.source_file
        });
        if !duplicate {
            bucket.push(entry);
        }
    }
}

/// Where a name is actually declared.
struct Origin {
    name: String,
    file: PathBuf,
    line: usize,
}

/// Follows export statements from one or more entry files.
#[derive(Debug, Default)]
pub struct ExportTracer {
    graph: ExportGraph,
}

impl ExportTracer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn graph(&self) -> &ExportGraph {
        &self.graph
    }

    /// Returns the traced exports of a file.
    pub fn exports_of(&self, file: &Path) -> &[TracedExport] {
        self.graph.exports_of(&normalize_path(file))
    }

    /// Traces `file` and everything it re-exports.
    ///
    /// Failing to read `file` itself is an error; failures further down the
    /// chain only drop the affected re-export.
    pub fn trace(&mut self, file: &Path) -> Result<()> {
        let file = normalize_path(file);
        if !self.graph.mark_visited(&file) {
            return Ok(());
        }

        let content = fs::read_to_string(&file).map_err(|source| AnalysisError::EntryRead {
            path: file.clone(),
            source,
        })?;
        debug!(file = %file.display(), "tracing exports");

        let lines: Vec<&str> = content.lines().collect();
        let imports = collect_imports(&lines);

        let mut idx = 0;
        while idx < lines.len() {
            let trimmed = lines[idx].trim();
            let line = idx + 1;
            let (statement, consumed) = if starts_export_list(trimmed) {
                join_braced_statement(&lines, idx)
            } else {
                (trimmed.to_string(), 1)
            };

            match classify_export_line(&statement) {
                Some(ExportLine::Star { module }) => self.trace_star(&file, &module),
                Some(ExportLine::ReExport {
                    specifiers, module, ..
                }) => self.trace_re_export(&file, line, &module, &specifiers),
                Some(ExportLine::List(specifiers)) | Some(ExportLine::TypeList(specifiers)) => {
                    self.trace_local_list(&file, &lines, line, &imports, &specifiers)
                }
                Some(ExportLine::Declaration(decl)) => {
                    self.graph
                        .push(&file, TracedExport::direct(decl.name, file.clone(), line));
                }
                None => {}
            }

            idx += consumed;
        }

        Ok(())
    }

    /// Collects the exports reachable from `entries`, deduplicated by
    /// source file, original name and exported name in first-seen order.
    pub fn collect<'a, I>(&self, entries: I) -> Vec<TracedExport>
    where
        I: IntoIterator<Item = &'a Path>,
    {
        let mut seen = HashSet::new();
        let mut collected = Vec::new();

        for entry in entries {
            for export in self.exports_of(entry) {
                let key = (
                    export.source_file.clone(),
                    export.original_name.clone(),
                    export.exported_name.clone(),
                );
                if seen.insert(key) {
                    collected.push(export.clone());
                }
            }
        }

        collected
    }

    /// Traces a file reached through a re-export, logging instead of failing.
    fn trace_dependency(&mut self, file: &Path) {
        if let Err(e) = self.trace(file) {
            warn!(error = %e, "skipping unreadable re-export target");
        }
    }

    /// `export * from "module"`
    fn trace_star(&mut self, file: &Path, module: &str) {
        let Some(target) = resolve_module(file, module) else {
            debug!(file = %file.display(), module, "unresolvable star export");
            return;
        };

        self.trace_dependency(&target);
        let inherited = self.graph.exports_of(&target).to_vec();
        for entry in inherited {
            self.graph.push(file, entry);
        }
    }

    /// `export { a, b as c } from "module"`
    fn trace_re_export(
        &mut self,
        file: &Path,
        line: usize,
        module: &str,
        specifiers: &[ExportSpecifier],
    ) {
        let Some(target) = resolve_module(file, module) else {
            debug!(file = %file.display(), module, "unresolvable re-export");
            return;
        };

        for spec in specifiers {
            let origin = self.resolve_binding(&target, &spec.original);
            self.graph
                .push(file, traced_entry(spec, origin, file, line));
        }
    }

    /// `export { a, b as c }` of imported or locally declared names.
    fn trace_local_list(
        &mut self,
        file: &Path,
        lines: &[&str],
        line: usize,
        imports: &[Import],
        specifiers: &[ExportSpecifier],
    ) {
        for spec in specifiers {
            let binding = imports
                .iter()
                .find_map(|import| import.binding(&spec.original).map(|b| (import, b)));

            let origin = match binding {
                Some((import, binding)) => {
                    let Some(target) = resolve_module(file, &import.source) else {
                        debug!(
                            file = %file.display(),
                            module = %import.source,
                            name = %spec.original,
                            "re-exported import is not resolvable"
                        );
                        continue;
                    };
                    binding
                        .exported_name()
                        .and_then(|name| self.resolve_binding(&target, name))
                }
                None => locate_in_lines(lines, &spec.original).map(|found| Origin {
                    name: spec.original.clone(),
                    file: file.to_path_buf(),
                    line: found,
                }),
            };

            self.graph
                .push(file, traced_entry(spec, origin, file, line));
        }
    }

    /// Finds where `name`, as exported by `target`, is declared.
    ///
    /// A direct declaration in `target` wins; otherwise `target` is traced
    /// and its own re-exports are searched.
    fn resolve_binding(&mut self, target: &Path, name: &str) -> Option<Origin> {
        if let Some(line) = locate_declaration(target, name) {
            return Some(Origin {
                name: name.to_string(),
                file: target.to_path_buf(),
                line,
            });
        }

        self.trace_dependency(target);
        self.graph
            .exports_of(target)
            .iter()
            .find(|export| export.exported_name == name)
            .map(|export| Origin {
                name: export.original_name.clone(),
                file: export.source_file.clone(),
                line: export.line,
            })
    }
}

/// Builds the traced entry for a list specifier, falling back to the
/// export statement's own location when no declaration was found.
fn traced_entry(
    spec: &ExportSpecifier,
    origin: Option<Origin>,
    file: &Path,
    line: usize,
) -> TracedExport {
    match origin {
        Some(origin) => TracedExport {
            original_name: origin.name,
            exported_name: spec.exported.clone(),
            source_file: origin.file,
            line: origin.line,
        },
        None => TracedExport {
            original_name: spec.original.clone(),
            exported_name: spec.exported.clone(),
            source_file: file.to_path_buf(),
            line,
        },
    }
}

fn collect_imports(lines: &[&str]) -> Vec<Import> {
    let mut imports = Vec::new();
    let mut idx = 0;
    while idx < lines.len() {
        let trimmed = lines[idx].trim();
        if !trimmed.starts_with("import") {
            idx += 1;
            continue;
        }
        let (statement, consumed) = join_braced_statement(lines, idx);
        if let Some(import) = parse_import(&statement) {
            imports.push(import);
        }
        idx += consumed;
    }
    imports
}
