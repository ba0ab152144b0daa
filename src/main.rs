use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use doccov::analysis::{analyze_path, analyze_workspace, workspace_members};
use doccov::report::{render, CoverageReport, ReportFormat, ReportOptions};

#[derive(Parser)]
#[command(name = "doccov")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version)]
#[command(about = "Documentation coverage for the exported API of TypeScript/JavaScript modules", long_about = None)]
struct Cli {
    /// File or directory to analyze
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Output format (text, json, markdown)
    #[arg(short, long, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Fail when coverage is below this percentage
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(0..=100))]
    threshold: Option<u32>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// List only undocumented symbols
    #[arg(short, long)]
    undocumented_only: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let report = build_report(&cli)?;

    let stdout = io::stdout();
    let options = ReportOptions {
        color: !cli.no_color && cli.format == ReportFormat::Text && stdout.is_terminal(),
        undocumented_only: cli.undocumented_only,
    };
    let mut writer = stdout.lock();
    render(cli.format, &report, options, &mut writer).context("Failed to write report")?;
    writer.flush().context("Failed to write report")?;

    if let Some(threshold) = cli.threshold {
        if report.stats.percentage < threshold {
            eprintln!(
                "Coverage {}% is below the threshold of {}%",
                report.stats.percentage, threshold
            );
            return Ok(ExitCode::FAILURE);
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Analyzes the requested path, as a workspace when its config declares one.
fn build_report(cli: &Cli) -> Result<CoverageReport> {
    let members = if cli.path.is_dir() {
        workspace_members(&cli.path)
    } else {
        None
    };

    match members {
        Some(members) => {
            debug!(members = members.len(), "analyzing workspace");
            let result = analyze_workspace(&cli.path, &members)
                .with_context(|| format!("Failed to analyze workspace {}", cli.path.display()))?;
            Ok(result.into())
        }
        None => {
            let result = analyze_path(&cli.path)
                .with_context(|| format!("Failed to analyze {}", cli.path.display()))?;
            Ok(result.into())
        }
    }
}

/// Logs go to stderr so report output on stdout stays machine-readable.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={level}", env!("CARGO_CRATE_NAME"))));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
