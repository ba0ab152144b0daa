//! Terminal report implementation.
//!
//! Lists each analyzed symbol with a documented/undocumented marker and
//! closes with the coverage summary.

use super::{CoverageReport, ReportOptions, Reporter};
use crate::analysis::{AnalysisMode, AnalysisResult, DocumentationStats};
use crossterm::style::{style, Color, Stylize};
use std::io::{self, Write};

/// Text reporter implementation.
pub struct TextReporter {
    options: ReportOptions,
}

impl TextReporter {
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.options.color {
            style(text).with(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.options.color {
            style(text).bold().to_string()
        } else {
            text.to_string()
        }
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
            "{} ({})",
            self.bold(&report.display_path(&result.path)),
            mode
        )?;
        for entry in &result.export_entries {
            writeln!(writer, "  entry: {}", report.display_path(entry))?;
        }

        let mut listed = 0;
        for symbol in CoverageReport::listed_symbols(result, &self.options) {
            let marker = if symbol.has_documentation {
                self.paint("✓", Color::Green)
            } else {
                self.paint("✗", Color::Red)
            };
            writeln!(
                writer,
                "  {} {:<9} {}  {}",
                marker,
                symbol.kind.label(),
                symbol.name,
                self.paint(
                    &format!("{}:{}", report.display_path(&symbol.source_file), symbol.line),
                    Color::DarkGrey
                )
            )?;
            listed += 1;
        }
        if listed == 0 {
            writeln!(writer, "  (no symbols to list)")?;
        }

        if report.is_workspace {
            writeln!(
                writer,
                "  {}/{} documented ({}%)",
                result.stats.documented, result.stats.total, result.stats.percentage
            )?;
        }
        writeln!(writer)
    }

    fn render_summary<W: Write>(&self, stats: &DocumentationStats, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "{}", self.bold("Summary"))?;
        writeln!(writer, "  Total exports:  {}", stats.total)?;
        writeln!(writer, "  Documented:     {}", stats.documented)?;
        writeln!(writer, "  Undocumented:   {}", stats.undocumented)?;

        if !stats.by_kind.is_empty() {
            writeln!(writer)?;
            writeln!(writer, "  By kind:")?;
            for (kind, kind_stats) in &stats.by_kind {
                writeln!(
                    writer,
                    "    {:<10} {}/{} ({}%)",
                    kind.label(),
                    kind_stats.documented,
                    kind_stats.total,
                    kind_stats.percentage()
                )?;
            }
        }
        Ok(())
    }
}

impl Reporter for TextReporter {
    fn render<W: Write>(&self, report: &CoverageReport, writer: &mut W) -> io::Result<()> {
        for result in &report.results {
            self.render_result(report, result, writer)?;
        }

        self.render_summary(&report.stats, writer)?;

        let verdict = report.verdict();
        let color = if report.stats.is_complete() {
            Color::Green
        } else if report.stats.percentage >= 70 {
            Color::Yellow
        } else {
            Color::Red
        };
        writeln!(writer)?;
        writeln!(
            writer,
            "{} {} {}",
            verdict.emoji(),
            self.paint(&format!("{}%", report.stats.percentage), color),
            verdict.message()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::test_support::sample_report;

    fn render_text(options: ReportOptions) -> String {
        let mut output = Vec::new();
        TextReporter::new(options)
            .render(&sample_report(), &mut output)
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_text_lists_symbols() {
        let output = render_text(ReportOptions::default());

        assert!(output.contains(". (public API)"));
        assert!(output.contains("entry: mod.ts"));
        assert!(output.contains("✓ function  documented  src/mod.ts:2"));
        assert!(output.contains("✗ class     Undocumented  src/mod.ts:5"));
    }

    #[test]
    fn test_text_summary() {
        let output = render_text(ReportOptions::default());

        assert!(output.contains("Total exports:  2"));
        assert!(output.contains("Undocumented:   1"));
        assert!(output.contains("function   1/1 (100%)"));
        assert!(output.contains("class      0/1 (0%)"));
        assert!(output.contains("⚠️ 50% Documentation coverage needs work"));
    }

    #[test]
    fn test_text_plain_without_color() {
        let output = render_text(ReportOptions::default());
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_text_colored() {
        let output = render_text(ReportOptions {
            color: true,
            ..Default::default()
        });
        assert!(output.contains('\u{1b}'));
    }

    #[test]
    fn test_text_undocumented_only() {
        let output = render_text(ReportOptions {
            undocumented_only: true,
            ..Default::default()
        });

        assert!(!output.contains("✓ function"));
        assert!(output.contains("Undocumented  src/mod.ts:5"));
        assert!(output.contains("Total exports:  2"));
    }
}
