//! Error types for export analysis.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can abort an analysis run.
///
/// Everything below the entry point degrades to "no contribution" instead
/// of producing one of these.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Failed to read entry file {}: {source}", .path.display())]
    EntryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Path does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Result type for analysis operations.
pub type Result<T, E = AnalysisError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AnalysisError::EntryRead {
            path: PathBuf::from("mod.ts"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        };
        assert_eq!(err.to_string(), "Failed to read entry file mod.ts: file not found");

        let err = AnalysisError::NotFound(PathBuf::from("missing"));
        assert!(err.to_string().contains("missing"));
    }
}
