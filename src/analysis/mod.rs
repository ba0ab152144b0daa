//! Export documentation analysis.
//!
//! This module finds the exported declarations of TypeScript/JavaScript
//! modules and checks which of them carry a JSDoc block.
//!
//! # Pipeline
//!
//! - [`trace`] follows `export` statements from entry files to the
//!   declarations they name, across renames and re-export chains
//! - [`docs`] binds `/** ... */` blocks to the declarations below them
//! - [`symbols`] turns traced exports into [`ExportedSymbol`] records
//! - [`stats`] reduces symbols into coverage totals
//!
//! Scanning is line-oriented: idiomatic one-declaration-per-line source is
//! handled, anything else degrades to "not an export".
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use doccov::analysis::analyze_path;
//!
//! let result = analyze_path(Path::new("./my-module"))?;
//! println!("{}% documented", result.stats.percentage);
//! for symbol in result.undocumented() {
//!     println!("{}:{} {}", symbol.source_file.display(), symbol.line, symbol.name);
//! }
//! ```

pub mod analyzer;
pub mod classify;
pub mod discover;
pub mod docs;
pub mod error;
pub mod locate;
pub mod resolve;
pub mod stats;
pub mod symbols;
pub mod trace;
pub mod types;
pub mod workspace;

// Re-export main types for convenience
pub use analyzer::{analyze_entries, analyze_path, scan_files, AnalysisMode, AnalysisResult};
pub use error::AnalysisError;
pub use stats::{DocumentationStats, KindStats};
pub use trace::{ExportGraph, ExportTracer};
pub use types::{ExportKind, ExportedSymbol, SymbolKind, TracedExport};
pub use workspace::{analyze_workspace, workspace_members, WorkspaceResult};
