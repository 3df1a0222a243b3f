//! Capture the current session state from a live manager

use super::SessionSnapshot;
use crate::tab::TabManager;

/// Snapshot the manager and stamp it with the current time
pub fn capture_session(manager: &TabManager) -> SessionSnapshot {
    let mut snapshot = manager.snapshot();
    snapshot.saved_at = Some(chrono::Utc::now().to_rfc3339());
    snapshot
}

/// Snapshot with every tab marked unmounted.
///
/// No editor widget exists when a saved session is next opened, so the
/// mounted flags are cleared before writing.
pub fn capture_session_for_exit(manager: &TabManager) -> SessionSnapshot {
    let mut snapshot = capture_session(manager);
    for tab in snapshot.entities.values_mut() {
        if let Some(view_state) = tab.view_state.as_mut() {
            view_state.is_mounted = false;
        }
    }
    snapshot
}
