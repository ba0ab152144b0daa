//! Configuration types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The fields of a `deno.json` file that drive analysis.
///
/// Unknown fields are ignored.
///
/// # Example
///
/// ```
/// use doccov::config::DocConfig;
///
/// let config: DocConfig = serde_json::from_str(r#"{"exports": "./mod.ts"}"#).unwrap();
/// assert!(config.has_exports());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DocConfig {
    /// Public entry points of the module.
    pub exports: Option<ExportsField>,

    /// Member directories of a workspace, relative to the config file.
    pub workspace: Option<Vec<String>>,
}

/// The `exports` field: a single entry path or a map of subpath to entry path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ExportsField {
    Single(String),
    Map(BTreeMap<String, String>),
}

impl ExportsField {
    /// Entry paths as written, in subpath order for maps.
    pub fn entries(&self) -> Vec<&str> {
        match self {
            ExportsField::Single(path) => vec![path.as_str()],
            ExportsField::Map(map) => map.values().map(String::as_str).collect(),
        }
    }
}

impl DocConfig {
    /// Returns true if an `exports` field is declared.
    pub fn has_exports(&self) -> bool {
        self.exports.is_some()
    }

    /// Returns true if the config declares workspace members.
    pub fn is_workspace(&self) -> bool {
        self.workspace.as_ref().is_some_and(|w| !w.is_empty())
    }

    /// Entry paths resolved against `root`.
    pub fn entry_paths(&self, root: &Path) -> Vec<PathBuf> {
        self.exports
            .as_ref()
            .map(|exports| exports.entries().into_iter().map(|e| root.join(e)).collect())
            .unwrap_or_default()
    }

    /// Workspace member directories resolved against `root`.
    pub fn member_paths(&self, root: &Path) -> Vec<PathBuf> {
        self.workspace
            .iter()
            .flatten()
            .map(|member| root.join(member))
            .collect()
    }
}
