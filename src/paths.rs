//! Storage paths for the local usage estimate.
//!
//! Everything lives under a single directory:
//! - `$MCP_USAGE_DIR/` when the override is set
//! - `~/.mcp-google-search/` otherwise
//!
//! The directory holds exactly one file, `usage.json`.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// The name of the default usage directory under the home directory.
const USAGE_DIR_NAME: &str = ".mcp-google-search";

/// The file holding the persisted usage record.
pub const USAGE_FILENAME: &str = "usage.json";

/// Resolves the usage directory without touching the filesystem.
///
/// An explicit override wins; otherwise `~/.mcp-google-search/` is used.
///
/// # Errors
///
/// Returns an error if no override is given and the home directory cannot be
/// determined.
pub fn resolve_usage_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }
    let home = dirs::home_dir().context("Could not determine home directory for usage storage")?;
    Ok(home.join(USAGE_DIR_NAME))
}

/// Creates `dir` and any missing parents. An existing directory is not an error.
pub fn ensure_dir(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)
}

/// Returns the usage record path inside `dir`: `<dir>/usage.json`
pub fn usage_file_path(dir: &Path) -> PathBuf {
    dir.join(USAGE_FILENAME)
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
