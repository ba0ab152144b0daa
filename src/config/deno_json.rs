//! Loader for `deno.json` / `deno.jsonc` configuration files.
//!
//! Both files are decoded as JSON after stripping comments and trailing
//! commas, so either may use the JSON-with-comments syntax.

use std::fs;
use std::path::{Path, PathBuf};

use super::types::DocConfig;

/// Config file names, in lookup order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["deno.json", "deno.jsonc"];

/// Errors that can occur while loading a config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the file from disk.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse JSON content.
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Returns the first config file present in `dir`.
pub fn find_config(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Parses a config file from a file path.
pub fn parse_file(path: &Path) -> ConfigResult<DocConfig> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parses a config from a string that may contain comments.
///
/// # Example
///
/// ```
/// use doccov::config::deno_json::parse_str;
///
/// let config = parse_str(r#"{
///     // public surface
///     "exports": "./mod.ts",
/// }"#).unwrap();
/// assert!(config.has_exports());
/// ```
pub fn parse_str(content: &str) -> ConfigResult<DocConfig> {
    let json = strip_jsonc(content);
    Ok(serde_json::from_str(&json)?)
}

/// Removes `//` and `/* */` comments outside string literals, then drops
/// commas that directly precede `}` or `]`.
pub fn strip_jsonc(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match (c, chars.peek().copied()) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                    }
                    if prev == '*' && skipped == '/' {
                        break;
                    }
                    prev = skipped;
                }
            }
            _ => out.push(c),
        }
    }

    remove_trailing_commas(&out)
}

fn remove_trailing_commas(json: &str) -> String {
    let chars: Vec<char> = json.chars().collect();
    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut idx = 0;

    while idx < chars.len() {
        let c = chars[idx];
        if in_string {
            out.push(c);
            if c == '\\' && idx + 1 < chars.len() {
                out.push(chars[idx + 1]);
                idx += 1;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
            out.push(c);
        } else if c == ',' {
            let next = chars[idx + 1..].iter().copied().find(|ch| !ch.is_whitespace());
            if !matches!(next, Some('}') | Some(']')) {
                out.push(c);
            }
        } else {
            out.push(c);
        }
        idx += 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::ExportsField;
    use tempfile::TempDir;

    #[test]
    fn test_parse_plain_json() {
        let config = parse_str(r#"{"name": "@scope/pkg", "exports": "./mod.ts"}"#).unwrap();
        assert_eq!(config.exports, Some(ExportsField::Single("./mod.ts".to_string())));
    }

    #[test]
    fn test_parse_jsonc() {
        let content = r#"{
            // line comment
            "exports": {
                ".": "./mod.ts", /* block */
                "./http": "./http.ts",
            },
            "workspace": ["./a",],
        }"#;
        let config = parse_str(content).unwrap();
        assert_eq!(config.exports.unwrap().entries().len(), 2);
        assert_eq!(config.workspace, Some(vec!["./a".to_string()]));
    }

    #[test]
    fn test_comment_markers_inside_strings_kept() {
        let stripped = strip_jsonc(r#"{"url": "https://example.com/*x*/", "s": "a,}"}"#);
        assert_eq!(stripped, r#"{"url": "https://example.com/*x*/", "s": "a,}"}"#);
    }

    #[test]
    fn test_escaped_quote_in_string() {
        let stripped = strip_jsonc(r#"{"q": "say \"hi\" // not a comment"}"#);
        assert!(stripped.contains("// not a comment"));
    }

    #[test]
    fn test_invalid_json() {
        let result = parse_str("{ invalid json }");
        assert!(matches!(result.unwrap_err(), ConfigError::JsonError(_)));
    }

    #[test]
    fn test_find_config_order() {
        let dir = TempDir::new().unwrap();
        assert_eq!(find_config(dir.path()), None);

        fs::write(dir.path().join("deno.jsonc"), "{}").unwrap();
        assert_eq!(find_config(dir.path()), Some(dir.path().join("deno.jsonc")));

        fs::write(dir.path().join("deno.json"), "{}").unwrap();
        assert_eq!(find_config(dir.path()), Some(dir.path().join("deno.json")));
    }

    #[test]
    fn test_parse_file_missing() {
        let result = parse_file(Path::new("/definitely/missing/deno.json"));
        assert!(matches!(result.unwrap_err(), ConfigError::IoError(_)));
    }
}
