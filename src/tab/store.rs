//! Normalized tab collection: an entity map plus the ordered list of ids.
//!
//! The store enforces only structural consistency (every id has exactly one
//! entity and vice versa). Selection, limits and recency live in
//! [`TabManager`](super::TabManager).

use super::{Tab, TabId};
use crate::error::{Result, SessionError};
use std::collections::HashMap;

/// Tabs keyed by id, ordered by insertion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabStore {
    ids: Vec<TabId>,
    entities: HashMap<TabId, Tab>,
}

impl TabStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from persisted parts, checking they describe the same set.
    ///
    /// Fails with `CorruptSnapshot` on any mismatch.
    pub fn from_parts(ids: Vec<TabId>, entities: HashMap<TabId, Tab>) -> Result<Self> {
        if ids.len() != entities.len() {
            return Err(SessionError::CorruptSnapshot(format!(
                "{} ids but {} entities",
                ids.len(),
                entities.len()
            )));
        }
        for (idx, id) in ids.iter().enumerate() {
            if ids[..idx].contains(id) {
                return Err(SessionError::CorruptSnapshot(format!("duplicate id {id}")));
            }
            match entities.get(id) {
                Some(tab) if tab.id == *id => {}
                Some(tab) => {
                    return Err(SessionError::CorruptSnapshot(format!(
                        "entity under key {id} has id {}",
                        tab.id
                    )));
                }
                None => {
                    return Err(SessionError::CorruptSnapshot(format!(
                        "id {id} has no entity"
                    )));
                }
            }
        }
        Ok(Self { ids, entities })
    }

    /// Split into `(ids, entities)` for persistence
    pub fn into_parts(self) -> (Vec<TabId>, HashMap<TabId, Tab>) {
        (self.ids, self.entities)
    }

    /// Append a tab. Returns false (and leaves the store unchanged) if the id exists.
    pub fn add_one(&mut self, tab: Tab) -> bool {
        if self.entities.contains_key(&tab.id) {
            return false;
        }
        self.ids.push(tab.id);
        self.entities.insert(tab.id, tab);
        true
    }

    /// Remove a tab, returning it with the index it occupied.
    ///
    /// Both the id and the entity must be present; otherwise nothing changes.
    pub fn remove_one(&mut self, id: TabId) -> Option<(usize, Tab)> {
        let idx = self.index_of(id)?;
        let tab = self.entities.remove(&id)?;
        self.ids.remove(idx);
        Some((idx, tab))
    }

    pub fn remove_all(&mut self) {
        self.ids.clear();
        self.entities.clear();
    }

    pub fn get(&self, id: TabId) -> Option<&Tab> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: TabId) -> Option<&mut Tab> {
        self.entities.get_mut(&id)
    }

    pub fn contains(&self, id: TabId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn index_of(&self, id: TabId) -> Option<usize> {
        self.ids.iter().position(|&t| t == id)
    }

    /// Ids in insertion order
    pub fn ids(&self) -> &[TabId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Tabs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Tab> + '_ {
        self.ids.iter().filter_map(|id| self.entities.get(id))
    }

    pub fn entities(&self) -> &HashMap<TabId, Tab> {
        &self.entities
    }
}
