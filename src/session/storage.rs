//! File I/O for session persistence
//!
//! Sessions are stored as JSON in `~/.config/tabdeck/session.json` unless the
//! config names another file.

use super::SessionSnapshot;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tabdeck_config::Config;

/// Get the default path to the session state file
pub fn session_path() -> PathBuf {
    Config::config_dir().join("session.json")
}

/// Save session state to a specific file
pub fn save_session_to(state: &SessionSnapshot, path: &Path) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }

    let contents =
        serde_json::to_string_pretty(state).context("Failed to serialize session state")?;

    // Atomic save: write to temp file then rename
    let temp_path = path.with_extension("json.tmp");
    std::fs::write(&temp_path, contents)
        .with_context(|| format!("Failed to write session state to {:?}", temp_path))?;
    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to move session state into {:?}", path))?;

    log::info!("Saved session state ({} tabs) to {:?}", state.ids.len(), path);
    Ok(())
}

/// Load session state from a specific file
///
/// Returns `None` if the file doesn't exist or is empty.
/// Returns an error if the file exists but is corrupt.
pub fn load_session_from(path: &Path) -> Result<Option<SessionSnapshot>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read session state from {:?}", path))?;

    if contents.trim().is_empty() {
        return Ok(None);
    }

    let state: SessionSnapshot = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse session state from {:?}", path))?;

    log::info!("Loaded session state ({} tabs) from {:?}", state.ids.len(), path);
    Ok(Some(state))
}

/// Remove a session state file if present
pub fn clear_session_at(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_file(path)
            .with_context(|| format!("Failed to remove session state file {:?}", path))?;
    }
    Ok(())
}
