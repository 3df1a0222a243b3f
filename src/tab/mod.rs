//! Tab management for multi-file editing sessions
//!
//! This module provides the core tab infrastructure including:
//! - `Tab`: a single open file with its content, dirty flag and view-state
//! - `TabStore`: the normalized collection of tabs
//! - `TabManager`: the session controller that owns the store and enforces limits
//! - `TabId`: unique identifier for each tab

mod manager;
pub mod store;

pub use manager::{AddTab, Direction, TabManager, UpdateTab};
pub use store::TabStore;

use crate::view_state::ViewState;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use tabdeck_config::TabConfig;
use uuid::Uuid;

/// Unique identifier for a tab, stable across save/restore
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(Uuid);

impl TabId {
    /// Fresh random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TabId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TabId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Language/runtime descriptor. Fields other than `language_name` are kept
/// verbatim and never interpreted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub language_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Metadata {
    pub fn new(language_name: impl Into<String>) -> Self {
        Self {
            language_name: language_name.into(),
            extra: Map::new(),
        }
    }
}

/// A single editing session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    /// Unique identifier, assigned on creation
    pub id: TabId,
    /// Display name; never blank
    pub filename: String,
    /// Source text, bounded by `config.max_content_delimiter`
    pub content: String,
    /// Set once the tab held content at creation or was edited
    pub is_dirty: bool,
    pub metadata: Metadata,
    /// Editor view-state; absent only in snapshots written without one
    #[serde(default)]
    pub view_state: Option<ViewState>,
    pub config: TabConfig,
}

impl Tab {
    /// Size of the content in its own delimiter's unit
    pub fn content_size(&self) -> usize {
        crate::delimiter::measure(&self.content, self.config.max_content_delimiter.units)
    }

    /// Create a minimal tab for unit tests (no manager, default config)
    #[cfg(test)]
    pub(crate) fn new_stub(filename: &str) -> Self {
        Self {
            id: TabId::new(),
            filename: filename.to_string(),
            content: String::new(),
            is_dirty: false,
            metadata: Metadata::new("plaintext"),
            view_state: Some(ViewState::default()),
            config: TabConfig::default(),
        }
    }
}
