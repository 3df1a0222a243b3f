//! Session state types for save/restore between launches
//!
//! The whole tab store is the unit of persistence: entities, their order,
//! the active tab and the edit recency list. The JSON layout uses camelCase
//! keys to match the browser store it is exchanged with.

pub mod capture;
pub mod restore;
pub mod storage;

use crate::tab::{Tab, TabId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Serializable copy of a `TabManager`'s state
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Tabs keyed by id
    #[serde(default)]
    pub entities: HashMap<TabId, Tab>,
    /// Tab ids in creation order
    #[serde(default)]
    pub ids: Vec<TabId>,
    #[serde(default)]
    pub active_tab_id: Option<TabId>,
    /// Edited tabs, least recent first
    #[serde(default)]
    pub recently_used_tabs: Vec<TabId>,
    /// Timestamp when the session was saved (RFC 3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
}

impl SessionSnapshot {
    /// Tabs in id order, skipping ids without an entity
    pub fn ordered_tabs(&self) -> impl Iterator<Item = &Tab> + '_ {
        self.ids.iter().filter_map(|id| self.entities.get(id))
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
