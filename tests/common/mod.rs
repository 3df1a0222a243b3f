//! Shared integration test helpers for tabdeck.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{manager_with_tabs, config_with_max_tabs};
//! ```
//!
//! The `#![allow(dead_code)]` attribute suppresses warnings when only a
//! subset of helpers are used per file.

#![allow(dead_code)]

use tabdeck::{AddTab, Config, Metadata, OverflowPolicy, TabConfig, TabId, TabManager};
use tempfile::TempDir;

/// Config with default values apart from `max_tabs`
pub fn config_with_max_tabs(max_tabs: usize) -> Config {
    Config {
        tab_defaults: TabConfig {
            max_tabs,
            ..TabConfig::default()
        },
        ..Config::default()
    }
}

/// Config with default values apart from the overflow policy
pub fn config_with_policy(overflow_policy: OverflowPolicy) -> Config {
    Config {
        overflow_policy,
        ..Config::default()
    }
}

/// Payload for a tab with the given name and content
pub fn payload(filename: &str, content: &str) -> AddTab {
    AddTab::new(filename, content, Metadata::new("javascript"))
}

/// Manager holding one empty (clean) tab per name, in order.
///
/// The last tab is active and the recency list is empty.
pub fn manager_with_tabs(names: &[&str]) -> (TabManager, Vec<TabId>) {
    let mut manager = TabManager::new();
    let ids = names
        .iter()
        .map(|name| {
            manager
                .add_tab(payload(name, ""))
                .expect("Failed to add tab")
        })
        .collect();
    (manager, ids)
}

/// Temporary directory plus a session file path inside it.
///
/// The `TempDir` must be kept alive for the duration of the test.
pub fn session_file() -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("session.json");
    (temp_dir, path)
}
