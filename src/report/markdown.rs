//! Markdown report implementation.
//!
//! Renders coverage results as Markdown tables for documentation and CI summaries.

use super::{CoverageReport, ReportOptions, Reporter};
use crate::analysis::{AnalysisMode, AnalysisResult};
use std::io::{self, Write};

/// Markdown reporter implementation.
pub struct MarkdownReporter {
    options: ReportOptions,
}

impl MarkdownReporter {
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    fn render_result<W: Write>(
        &self,
        report: &CoverageReport,
        result: &AnalysisResult,
        writer: &mut W,
    ) -> io::Result<()> {
        let mode = match result.mode {
            AnalysisMode::PublicApi => "public API",
            AnalysisMode::FullScan => "full scan",
        };
        writeln!(
            writer,
            "### `{}` ({}, {}%)",
            report.display_path(&result.path),
            mode,
            result.stats.percentage
        )?;
        writeln!(writer)?;

        if !result.export_entries.is_empty() {
            let entries: Vec<_> = result
                .export_entries
                .iter()
                .map(|e| format!("`{}`", report.display_path(e)))
                .collect();
            writeln!(writer, "**Entries:** {}", entries.join(", "))?;
            writeln!(writer)?;
        }

        let symbols: Vec<_> = CoverageReport::listed_symbols(result, &self.options).collect();
        if symbols.is_empty() {
            writeln!(writer, "_No symbols to list._")?;
            writeln!(writer)?;
            return Ok(());
        }

        writeln!(writer, "| | Symbol | Kind | Location |")?;
        writeln!(writer, "|---|--------|------|----------|")?;
        for symbol in symbols {
            let marker = if symbol.has_documentation { "✅" } else { "❌" };
            writeln!(
                writer,
                "| {} | `{}` | {} | {}:{} |",
                marker,
                symbol.name,
                symbol.kind,
                report.display_path(&symbol.source_file),
                symbol.line
            )?;
        }
        writeln!(writer)
    }
}

impl Reporter for MarkdownReporter {
    fn render<W: Write>(&self, report: &CoverageReport, writer: &mut W) -> io::Result<()> {
        let verdict = report.verdict();

        // Title
        writeln!(writer, "# Documentation Coverage Report")?;
        writeln!(writer)?;
        writeln!(
            writer,
            "{} **{}%** {}",
            verdict.emoji(),
            report.stats.percentage,
            verdict.message()
        )?;
        writeln!(writer)?;

        // Summary section
        writeln!(writer, "## Summary")?;
        writeln!(writer)?;
        writeln!(writer, "| Metric | Count |")?;
        writeln!(writer, "|--------|-------|")?;
        writeln!(writer, "| Total Exports | {} |", report.stats.total)?;
        writeln!(writer, "| Documented | {} |", report.stats.documented)?;
        writeln!(writer, "| Undocumented | {} |", report.stats.undocumented)?;
        writeln!(writer, "| Coverage | {}% |", report.stats.percentage)?;
        writeln!(writer)?;

        // Per-kind breakdown
        if !report.stats.by_kind.is_empty() {
            writeln!(writer, "## By Kind")?;
            writeln!(writer)?;
            writeln!(writer, "| Kind | Documented | Undocumented | Total | Coverage |")?;
            writeln!(writer, "|------|------------|--------------|-------|----------|")?;
            for (kind, stats) in &report.stats.by_kind {
                writeln!(
                    writer,
                    "| {} | {} | {} | {} | {}% |",
                    kind,
                    stats.documented,
                    stats.undocumented(),
                    stats.total,
                    stats.percentage()
                )?;
            }
            writeln!(writer)?;
        }

        // Symbols
        writeln!(writer, "## Symbols")?;
        writeln!(writer)?;
        for result in &report.results {
            self.render_result(report, result, writer)?;
        }

        // Footer
        writeln!(writer, "---")?;
        writeln!(writer, "*Generated by doccov*")?;

        Ok(())
    }
}
