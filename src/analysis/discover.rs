//! Source file discovery for full-scan mode.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::error::Result;

/// Extensions scanned for exports.
pub const SOURCE_EXTENSIONS: [&str; 5] = ["ts", "tsx", "js", "jsx", "mjs"];

/// Returns true if the path has a scanned source extension.
pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Check if a directory should be ignored during traversal.
fn is_ignored_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() || entry.depth() == 0 {
        return false;
    }

    let name = entry.file_name().to_string_lossy();
    matches!(
        name.as_ref(),
        "node_modules" | ".git" | "dist" | "build" | "coverage" | "test" | "tests"
    )
}

/// Check if a file is a test file by naming convention.
fn is_test_file(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    name.contains(".test.") || name.contains(".spec.") || name.contains("_test.")
}

/// Lists source files under `root`, sorted by path.
pub fn discover_source_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_ignored_dir(e))
    {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_file() && is_source_file(path) && !is_test_file(path) {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, rel: &str) {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn relative(dir: &TempDir, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| {
                f.strip_prefix(dir.path())
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_extension_allow_list() {
        let dir = TempDir::new().unwrap();
        for file in ["a.ts", "b.tsx", "c.js", "d.jsx", "e.mjs", "f.cjs", "g.json", "h.md"] {
            touch(&dir, file);
        }

        let files = discover_source_files(dir.path()).unwrap();
        assert_eq!(
            relative(&dir, &files),
            vec!["a.ts", "b.tsx", "c.js", "d.jsx", "e.mjs"]
        );
    }

    #[test]
    fn test_exclusions() {
        let dir = TempDir::new().unwrap();
        for file in [
            "src/lib.ts",
            "src/lib.test.ts",
            "src/lib.spec.js",
            "src/lib_test.ts",
            "node_modules/pkg/index.js",
            "dist/out.js",
            "build/out.js",
            "coverage/report.js",
            "test/helper.ts",
            "src/tests/fixture.ts",
            ".git/hooks/pre-commit.js",
        ] {
            touch(&dir, file);
        }

        let files = discover_source_files(dir.path()).unwrap();
        assert_eq!(relative(&dir, &files), vec!["src/lib.ts"]);
    }
}
