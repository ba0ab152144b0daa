//! JSON report implementation.
//!
//! Serializes coverage results for machine-readable output.

use super::{CoverageReport, ReportOptions, Reporter};
use crate::analysis::{AnalysisMode, DocumentationStats, ExportKind, SymbolKind};
use serde::Serialize;
use std::io::{self, Write};

/// JSON reporter implementation.
pub struct JsonReporter {
    options: ReportOptions,
}

impl JsonReporter {
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }
}

/// Serializable symbol for JSON output.
#[derive(Serialize)]
struct JsonSymbol<'a> {
    name: &'a str,
    kind: SymbolKind,
    file: String,
    line: usize,
    documented: bool,
    export_kind: ExportKind,
}

/// Serializable per-path result for JSON output.
#[derive(Serialize)]
struct JsonResult<'a> {
    path: String,
    mode: AnalysisMode,
    has_config: bool,
    has_exports_field: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    entries: Vec<String>,
    stats: &'a DocumentationStats,
    symbols: Vec<JsonSymbol<'a>>,
}

/// Root JSON report structure.
#[derive(Serialize)]
struct JsonReport<'a> {
    root: String,
    workspace: bool,
    summary: &'a DocumentationStats,
    results: Vec<JsonResult<'a>>,
}

impl Reporter for JsonReporter {
    fn render<W: Write>(&self, report: &CoverageReport, writer: &mut W) -> io::Result<()> {
        let results = report
            .results
            .iter()
            .map(|result| JsonResult {
                path: report.display_path(&result.path),
                mode: result.mode,
                has_config: result.has_config,
                has_exports_field: result.has_exports_field,
                entries: result
                    .export_entries
                    .iter()
                    .map(|e| report.display_path(e))
                    .collect(),
                stats: &result.stats,
                symbols: CoverageReport::listed_symbols(result, &self.options)
                    .map(|s| JsonSymbol {
                        name: &s.name,
                        kind: s.kind,
                        file: report.display_path(&s.source_file),
                        line: s.line,
                        documented: s.has_documentation,
                        export_kind: s.export_kind,
                    })
                    .collect(),
            })
            .collect();

        let output = JsonReport {
            root: report.root.display().to_string(),
            workspace: report.is_workspace,
            summary: &report.stats,
            results,
        };

        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::test_support::sample_report;

    fn render_json(options: ReportOptions) -> serde_json::Value {
        let mut output = Vec::new();
        JsonReporter::new(options)
            .render(&sample_report(), &mut output)
            .unwrap();
        serde_json::from_slice(&output).unwrap()
    }

    #[test]
    fn test_json_summary() {
        let parsed = render_json(ReportOptions::default());

        assert_eq!(parsed["summary"]["total"], 2);
        assert_eq!(parsed["summary"]["documented"], 1);
        assert_eq!(parsed["summary"]["percentage"], 50);
        assert_eq!(parsed["summary"]["by_kind"]["class"]["total"], 1);
        assert_eq!(parsed["workspace"], false);
    }

    #[test]
    fn test_json_symbols() {
        let parsed = render_json(ReportOptions::default());

        let symbols = parsed["results"][0]["symbols"].as_array().unwrap();
        assert_eq!(symbols.len(), 2);
        assert_eq!(symbols[0]["name"], "documented");
        assert_eq!(symbols[0]["kind"], "function");
        assert_eq!(symbols[0]["file"], "src/mod.ts");
        assert_eq!(symbols[0]["export_kind"], "named");
        assert_eq!(parsed["results"][0]["mode"], "public_api");
        assert_eq!(parsed["results"][0]["entries"][0], "mod.ts");
    }

    #[test]
    fn test_json_undocumented_only() {
        let parsed = render_json(ReportOptions {
            undocumented_only: true,
            ..Default::default()
        });

        let symbols = parsed["results"][0]["symbols"].as_array().unwrap();
        assert_eq!(symbols.len(), 1);
        assert_eq!(symbols[0]["documented"], false);
        // Totals are unaffected by the listing filter
        assert_eq!(parsed["summary"]["total"], 2);
    }
}
