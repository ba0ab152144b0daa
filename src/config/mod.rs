//! Configuration loading for doccov.
//!
//! A module declares its public surface in `deno.json` (or `deno.jsonc`)
//! through the `exports` field, and workspaces list their members in the
//! `workspace` field. Both are optional.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use doccov::config::load_config;
//!
//! if let Some(loaded) = load_config(Path::new(".")) {
//!     println!("entries: {:?}", loaded.config.entry_paths(Path::new(".")));
//! }
//! ```

pub mod deno_json;
pub mod types;

use std::path::{Path, PathBuf};

use tracing::warn;

pub use deno_json::{find_config, parse_file, parse_str, ConfigError, ConfigResult};
pub use types::{DocConfig, ExportsField};

/// A decoded config together with the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub path: PathBuf,
    pub config: DocConfig,
}

/// Loads the config of `dir`, if any.
///
/// A config that cannot be read or decoded is treated as absent.
pub fn load_config(dir: &Path) -> Option<LoadedConfig> {
    let path = find_config(dir)?;
    match parse_file(&path) {
        Ok(config) => Some(LoadedConfig { path, config }),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unusable config");
            None
        }
    }
}
