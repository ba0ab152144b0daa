//! Workspace aggregation.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::warn;

use super::analyzer::{analyze_path, AnalysisResult};
use super::error::{AnalysisError, Result};
use super::stats::DocumentationStats;
use crate::config::load_config;

/// Per-member results plus totals over all members.
#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceResult {
    pub root: PathBuf,
    pub members: Vec<AnalysisResult>,
    pub stats: DocumentationStats,
}

/// Returns the member directories declared by the config in `root`.
pub fn workspace_members(root: &Path) -> Option<Vec<PathBuf>> {
    let loaded = load_config(root)?;
    loaded
        .config
        .is_workspace()
        .then(|| loaded.config.member_paths(root))
}

/// Analyzes each member independently and sums the results.
///
/// Members that do not exist are skipped; any other member failure aborts.
pub fn analyze_workspace(root: &Path, members: &[PathBuf]) -> Result<WorkspaceResult> {
    let mut results = Vec::with_capacity(members.len());

    for member in members {
        match analyze_path(member) {
            Ok(result) => results.push(result),
            Err(AnalysisError::NotFound(path)) => {
                warn!(member = %path.display(), "workspace member does not exist");
            }
            Err(e) => return Err(e),
        }
    }

    let stats = DocumentationStats::from_symbols(results.iter().flat_map(|r| &r.symbols));

    Ok(WorkspaceResult {
        root: root.to_path_buf(),
        members: results,
        stats,
    })
}
