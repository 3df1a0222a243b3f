//! Helpers for restoring session state

use super::storage::load_session_from;
use crate::tab::TabManager;
use anyhow::Result;
use std::path::Path;
use tabdeck_config::Config;

/// Build a manager from the session file at `path`.
///
/// A missing or empty file yields an empty manager. A file that parses but
/// violates the store invariants is logged and discarded, so a bad save never
/// blocks startup. Unreadable or unparseable files are reported as errors.
pub fn restore_session(config: &Config, path: &Path) -> Result<TabManager> {
    let mut manager = TabManager::with_config(config)?;

    let Some(snapshot) = load_session_from(path)? else {
        return Ok(manager);
    };

    if let Err(e) = manager.restore(snapshot) {
        log::warn!(
            "Session restore: discarding saved session from {:?}: {}",
            path,
            e
        );
    }
    Ok(manager)
}
