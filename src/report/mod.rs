//! Rendering of coverage results.
//!
//! This module provides reporters for outputting analysis results in
//! various formats: colored terminal text, JSON, and Markdown.

pub mod json;
pub mod markdown;
pub mod text;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::analysis::{AnalysisResult, DocumentationStats, ExportedSymbol, WorkspaceResult};

/// Report format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Terminal text, optionally colored
    #[default]
    Text,
    /// JSON format - machine-readable, full data
    Json,
    /// Markdown format - documentation/reporting
    Markdown,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            _ => Err(format!(
                "Unknown report format: '{}'. Valid formats: text, json, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Rendering switches shared by all reporters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Emit ANSI colors (text format only).
    pub color: bool,
    /// List only undocumented symbols.
    pub undocumented_only: bool,
}

/// Coverage band used for the summary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Verdict {
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            p if p >= 90 => Verdict::Excellent,
            p if p >= 70 => Verdict::Good,
            p if p >= 40 => Verdict::Fair,
            _ => Verdict::Poor,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Verdict::Excellent => "🎉",
            Verdict::Good => "👍",
            Verdict::Fair => "⚠️",
            Verdict::Poor => "❌",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Excellent => "Excellent documentation coverage",
            Verdict::Good => "Good documentation coverage",
            Verdict::Fair => "Documentation coverage needs work",
            Verdict::Poor => "Most exports are undocumented",
        }
    }
}

/// Everything a reporter renders: one or more analyzed paths and the
/// totals over all of them.
#[derive(Debug, Clone)]
pub struct CoverageReport {
    /// Root the report is relative to.
    pub root: PathBuf,
    /// One result per analyzed path (a single one outside workspaces).
    pub results: Vec<AnalysisResult>,
    /// Totals over every result.
    pub stats: DocumentationStats,
    /// Whether the results are workspace members.
    pub is_workspace: bool,
}

impl From<AnalysisResult> for CoverageReport {
    fn from(result: AnalysisResult) -> Self {
        let root = if result.path.is_file() {
            result.path.parent().map(Path::to_path_buf).unwrap_or_default()
        } else {
            result.path.clone()
        };
        Self {
            root,
            stats: result.stats.clone(),
            results: vec![result],
            is_workspace: false,
        }
    }
}

impl From<WorkspaceResult> for CoverageReport {
    fn from(workspace: WorkspaceResult) -> Self {
        Self {
            root: workspace.root,
            results: workspace.members,
            stats: workspace.stats,
            is_workspace: true,
        }
    }
}

impl CoverageReport {
    /// Displays `path` relative to the report root when possible.
    pub fn display_path(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        if relative.as_os_str().is_empty() {
            ".".to_string()
        } else {
            relative.display().to_string()
        }
    }

    /// Symbols of `result` selected by `options`.
    pub fn listed_symbols<'a>(
        result: &'a AnalysisResult,
        options: &ReportOptions,
    ) -> impl Iterator<Item = &'a ExportedSymbol> {
        let undocumented_only = options.undocumented_only;
        result
            .symbols
            .iter()
            .filter(move |s| !undocumented_only || !s.has_documentation)
    }

    /// Verdict for the overall percentage.
    pub fn verdict(&self) -> Verdict {
        Verdict::from_percentage(self.stats.percentage)
    }
}

/// Trait for reporters.
pub trait Reporter {
    /// Render the report to the given writer.
    fn render<W: Write>(&self, report: &CoverageReport, writer: &mut W) -> io::Result<()>;
}

/// Render the report in the specified format.
pub fn render<W: Write>(
    format: ReportFormat,
    report: &CoverageReport,
    options: ReportOptions,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ReportFormat::Text => text::TextReporter::new(options).render(report, writer),
        ReportFormat::Json => json::JsonReporter::new(options).render(report, writer),
        ReportFormat::Markdown => markdown::MarkdownReporter::new(options).render(report, writer),
    }
}

/// Render the report to a string.
pub fn render_to_string(
    format: ReportFormat,
    report: &CoverageReport,
    options: ReportOptions,
) -> io::Result<String> {
    let mut buffer = Vec::new();
    render(format, report, options, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
