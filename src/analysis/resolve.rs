//! Relative module specifier resolution.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Suffixes tried, in order, after the exact path.
pub const RESOLVE_SUFFIXES: [&str; 7] = [".ts", ".tsx", ".js", ".jsx", ".mjs", "/mod.ts", "/index.ts"];

/// Returns true for `./` and `../` style specifiers.
pub fn is_relative_specifier(specifier: &str) -> bool {
    specifier.starts_with("./") || specifier.starts_with("../") || specifier == "." || specifier == ".."
}

/// Resolves `specifier` as written in `from_file` to an existing file.
///
/// Bare package specifiers are never resolved. The exact path is tried
/// first, then each of [`RESOLVE_SUFFIXES`].
pub fn resolve_module(from_file: &Path, specifier: &str) -> Option<PathBuf> {
    if !is_relative_specifier(specifier) {
        return None;
    }

    let base_dir = from_file.parent().unwrap_or_else(|| Path::new(""));
    let base = normalize_path(&base_dir.join(specifier));

    if base.is_file() {
        return Some(base);
    }

    RESOLVE_SUFFIXES.iter().find_map(|suffix| {
        let mut candidate = OsString::from(base.as_os_str());
        candidate.push(suffix);
        let candidate = PathBuf::from(candidate);
        candidate.is_file().then_some(candidate)
    })
}

/// Lexically removes `.` and `..` components without touching the file system.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                ) && normalized.pop();
                if !popped && !matches!(normalized.components().next_back(), Some(Component::RootDir)) {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, rel: &str) -> PathBuf {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "").unwrap();
        path
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("/a/b/../c/./d.ts")), PathBuf::from("/a/c/d.ts"));
        assert_eq!(normalize_path(Path::new("a/../../b")), PathBuf::from("../b"));
        assert_eq!(normalize_path(Path::new("/../a")), PathBuf::from("/a"));
    }

    #[test]
    fn test_bare_specifier_not_resolved() {
        let dir = TempDir::new().unwrap();
        let from = touch(dir.path(), "mod.ts");
        touch(dir.path(), "react.ts");
        assert_eq!(resolve_module(&from, "react"), None);
        assert_eq!(resolve_module(&from, "@std/path"), None);
    }

    #[test]
    fn test_exact_path_first() {
        let dir = TempDir::new().unwrap();
        let from = touch(dir.path(), "mod.ts");
        let target = touch(dir.path(), "a.ts");
        touch(dir.path(), "a.ts.ts");
        assert_eq!(resolve_module(&from, "./a.ts"), Some(target));
    }

    #[test]
    fn test_suffix_order() {
        let dir = TempDir::new().unwrap();
        let from = touch(dir.path(), "src/mod.ts");
        let js = touch(dir.path(), "src/util.js");
        touch(dir.path(), "src/util.mjs");
        assert_eq!(resolve_module(&from, "./util"), Some(js));

        let index = touch(dir.path(), "lib/index.ts");
        assert_eq!(resolve_module(&from, "../lib"), Some(index));

        let mod_ts = touch(dir.path(), "pkg/mod.ts");
        touch(dir.path(), "pkg/index.ts");
        assert_eq!(resolve_module(&from, "../pkg"), Some(mod_ts));
    }

    #[test]
    fn test_unresolvable() {
        let dir = TempDir::new().unwrap();
        let from = touch(dir.path(), "mod.ts");
        assert_eq!(resolve_module(&from, "./missing"), None);
    }
}
