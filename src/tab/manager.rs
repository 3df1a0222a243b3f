//! Tab manager: the single writer for all session state
//!
//! Every public operation validates first and mutates second, so a failed
//! call leaves the manager exactly as it was.

use super::{Metadata, Tab, TabId, TabStore};
use crate::delimiter;
use crate::error::{Result, SessionError};
use crate::session::SessionSnapshot;
use crate::view_state::{Annotation, CodeResponseField, ResizeLayout, ViewState, ViewStatePatch};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tabdeck_config::{Config, ContentDelimiter, OverflowPolicy, TabConfig, TabConfigPatch};

/// Direction for cyclic tab navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Previous,
}

impl FromStr for Direction {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "next" => Ok(Direction::Next),
            "previous" | "prev" => Ok(Direction::Previous),
            other => Err(SessionError::InvalidInput(format!(
                "unknown direction '{other}'"
            ))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Next => f.write_str("next"),
            Direction::Previous => f.write_str("previous"),
        }
    }
}

/// Payload for [`TabManager::add_tab`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AddTab {
    pub filename: String,
    pub content: String,
    pub metadata: Metadata,
    /// Overrides merged over the manager's defaults
    pub config: TabConfigPatch,
}

impl AddTab {
    pub fn new(filename: impl Into<String>, content: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
            metadata,
            config: TabConfigPatch::default(),
        }
    }

    pub fn with_config(mut self, config: TabConfigPatch) -> Self {
        self.config = config;
        self
    }
}

/// Payload for [`TabManager::update_tab`]. `None` fields are left alone.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateTab {
    pub id: TabId,
    pub filename: Option<String>,
    pub content: Option<String>,
    pub view_state: ViewStatePatch,
    pub config: TabConfigPatch,
}

impl UpdateTab {
    pub fn new(id: TabId) -> Self {
        Self {
            id,
            filename: None,
            content: None,
            view_state: ViewStatePatch::default(),
            config: TabConfigPatch::default(),
        }
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn view_state(mut self, patch: ViewStatePatch) -> Self {
        self.view_state = patch;
        self
    }

    pub fn config(mut self, config: TabConfigPatch) -> Self {
        self.config = config;
        self
    }
}

/// Owns every open tab plus the active selection and edit recency
#[derive(Debug, Clone)]
pub struct TabManager {
    tabs: TabStore,
    /// Currently active tab ID
    active_tab_id: Option<TabId>,
    /// Edited tabs, least recent first
    recently_used_tabs: Vec<TabId>,
    defaults: TabConfig,
    overflow_policy: OverflowPolicy,
}

impl TabManager {
    /// Create an empty manager with built-in defaults
    pub fn new() -> Self {
        Self::from_defaults(TabConfig::default(), OverflowPolicy::default())
    }

    /// Create an empty manager using the tab defaults and overflow policy from `config`.
    ///
    /// Fails with `InvalidInput` when `config` does not pass
    /// [`Config::validate`], e.g. a zero `max_tabs` or content limit.
    pub fn with_config(config: &Config) -> Result<Self> {
        config
            .validate()
            .map_err(|e| SessionError::InvalidInput(e.to_string()))?;
        Ok(Self::from_defaults(config.tab_defaults, config.overflow_policy))
    }

    fn from_defaults(defaults: TabConfig, overflow_policy: OverflowPolicy) -> Self {
        Self {
            tabs: TabStore::new(),
            active_tab_id: None,
            recently_used_tabs: Vec::new(),
            defaults,
            overflow_policy,
        }
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Open a new tab and make it active.
    ///
    /// Fails with `InvalidInput` for a blank filename or a zero content limit,
    /// `CapacityExceeded` when the effective `max_tabs` is reached, and
    /// `ContentTooLarge` for oversized content under `OverflowPolicy::Reject`.
    pub fn add_tab(&mut self, payload: AddTab) -> Result<TabId> {
        let AddTab {
            filename,
            content,
            metadata,
            config,
        } = payload;

        if filename.trim().is_empty() {
            return Err(SessionError::InvalidInput(
                "Filename must be a non-empty string".to_string(),
            ));
        }

        let max_tabs = config.max_tabs.unwrap_or(self.defaults.max_tabs);
        if self.tabs.len() >= max_tabs {
            log::warn!(
                "Refusing to open '{}': {} of {} tabs open",
                filename,
                self.tabs.len(),
                max_tabs
            );
            return Err(SessionError::CapacityExceeded { max_tabs });
        }

        validate_patch(&config)?;
        let tab_config = self.defaults.merged(&config);
        let content = self.fit(&content, &tab_config.max_content_delimiter)?;
        let is_dirty = !content.is_empty();

        let tab = Tab {
            id: TabId::new(),
            filename,
            content,
            is_dirty,
            metadata,
            view_state: Some(ViewState::default()),
            config: tab_config,
        };
        let id = tab.id;

        if !self.tabs.add_one(tab) {
            // A v4 collision; treat like any other refused input.
            return Err(SessionError::InvalidInput(format!("duplicate tab id {id}")));
        }
        self.active_tab_id = Some(id);
        if is_dirty {
            self.recently_used_tabs.push(id);
        }

        log::info!("Created new tab {} (total: {})", id, self.tabs.len());
        Ok(id)
    }

    /// Make `id` the active tab. Unknown ids are ignored.
    pub fn set_active_tab(&mut self, id: TabId) {
        if self.tabs.contains(id) {
            self.active_tab_id = Some(id);
            log::debug!("Switched to tab {}", id);
        } else {
            log::debug!("Ignoring switch to unknown tab {}", id);
        }
    }

    /// Close a tab. Unknown and non-closable tabs are left alone.
    ///
    /// If the closed tab was active, the most recently edited surviving tab
    /// becomes active; failing that the tab before it, then the first tab.
    pub fn remove_tab(&mut self, id: TabId) {
        match self.tabs.get(id) {
            None => {
                log::debug!("Ignoring close of unknown tab {}", id);
                return;
            }
            Some(tab) if !tab.config.is_closable => {
                log::debug!("Tab {} is not closable", id);
                return;
            }
            Some(_) => {}
        }

        let Some((removed_idx, _)) = self.tabs.remove_one(id) else {
            return;
        };
        self.recently_used_tabs.retain(|&recent| recent != id);

        log::info!(
            "Closed tab {} (index {}, remaining: {})",
            id,
            removed_idx,
            self.tabs.len()
        );

        if self.active_tab_id != Some(id) {
            return;
        }

        let from_recency = self
            .recently_used_tabs
            .iter()
            .rev()
            .copied()
            .find(|&recent| recent != id && self.tabs.contains(recent));

        let next = from_recency.or_else(|| {
            let ids = self.tabs.ids();
            if removed_idx > 0 {
                ids.get(removed_idx - 1).copied()
            } else {
                ids.first().copied()
            }
        });

        match next {
            Some(next_id) => self.set_active_tab(next_id),
            None => self.active_tab_id = None,
        }
    }

    /// Move the selection one tab forward or back, wrapping at either end
    pub fn switch_tab(&mut self, direction: Direction) {
        let Some(active_id) = self.active_tab_id else {
            return;
        };
        let Some(current_idx) = self.tabs.index_of(active_id) else {
            return;
        };

        let len = self.tabs.len();
        let new_idx = match direction {
            Direction::Next => (current_idx + 1) % len,
            Direction::Previous => (current_idx + len - 1) % len,
        };
        let target = self.tabs.ids()[new_idx];
        if self.tabs.contains(target) {
            self.active_tab_id = Some(target);
            log::debug!("Switched {} to tab {}", direction, target);
        }
    }

    /// Drop every tab, closable or not
    pub fn close_all_tabs(&mut self) {
        let count = self.tabs.len();
        self.tabs.remove_all();
        self.recently_used_tabs.clear();
        self.active_tab_id = None;
        log::info!("Closed all tabs ({})", count);
    }

    /// Apply an edit to a tab. Unknown ids are ignored.
    ///
    /// Content over the effective delimiter (payload override, else the
    /// tab's own) is truncated or rejected per the overflow policy; a
    /// rejection leaves the tab untouched. Changed content marks the tab
    /// dirty and moves it to the most-recent end of the recency list.
    pub fn update_tab(&mut self, payload: UpdateTab) -> Result<()> {
        let UpdateTab {
            id,
            filename,
            content,
            view_state,
            config,
        } = payload;

        let Some(tab) = self.tabs.get(id) else {
            log::debug!("Ignoring update of unknown tab {}", id);
            return Ok(());
        };

        if let Some(name) = &filename
            && name.trim().is_empty()
        {
            return Err(SessionError::InvalidInput(
                "Filename must be a non-empty string".to_string(),
            ));
        }
        validate_patch(&config)?;

        let new_config = tab.config.merged(&config);
        let delimiter = new_config.max_content_delimiter;
        let new_content = match content {
            Some(content) => Some(self.fit(&content, &delimiter)?),
            // A tighter delimiter applies to the content already there.
            None if delimiter::is_over_limit(&tab.content, &delimiter) => {
                Some(self.fit(&tab.content, &delimiter)?)
            }
            None => None,
        };

        let Some(tab) = self.tabs.get_mut(id) else {
            return Ok(());
        };

        let changed = match new_content {
            Some(content) if content != tab.content => {
                tab.content = content;
                true
            }
            _ => false,
        };
        tab.is_dirty |= changed;

        if let Some(name) = filename {
            tab.filename = name;
        }
        if !view_state.is_empty() {
            view_state.apply_to(tab.view_state.get_or_insert_with(ViewState::default));
        }
        tab.config = new_config;

        if changed {
            self.touch(id);
        }
        Ok(())
    }

    /// Merge caller data into a tab's view-state without touching content,
    /// dirty state or recency. Silently ignored when the tab or its
    /// view-state is missing.
    pub fn annotate(&mut self, id: TabId, annotation: Annotation) {
        match self.tabs.get_mut(id).and_then(|tab| tab.view_state.as_mut()) {
            Some(view_state) => annotation.apply_to(view_state),
            None => log::debug!("Ignoring annotation for tab {} without view-state", id),
        }
    }

    /// Store an execution result (or in-flight marker) on a tab
    pub fn set_code_response(&mut self, id: TabId, response: CodeResponseField) {
        self.annotate(id, Annotation::CodeResponse(response));
    }

    /// Store the output panel layout on a tab
    pub fn set_resize_layout(&mut self, id: TabId, layout: ResizeLayout) {
        self.annotate(id, Annotation::Layout(layout));
    }

    /// Record whether an editor widget currently shows the tab
    pub fn set_mounted(&mut self, id: TabId, is_mounted: bool) {
        self.annotate(id, Annotation::Mounted(is_mounted));
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Get a reference to the active tab
    pub fn active_tab(&self) -> Option<&Tab> {
        self.active_tab_id.and_then(|id| self.tabs.get(id))
    }

    /// Get the active tab ID
    pub fn active_tab_id(&self) -> Option<TabId> {
        self.active_tab_id
    }

    /// Get index of active tab (0-based)
    pub fn active_tab_index(&self) -> Option<usize> {
        self.active_tab_id.and_then(|id| self.tabs.index_of(id))
    }

    /// Get a tab by ID
    pub fn get_tab(&self, id: TabId) -> Option<&Tab> {
        self.tabs.get(id)
    }

    /// All tabs in creation order
    pub fn tabs(&self) -> impl Iterator<Item = &Tab> + '_ {
        self.tabs.iter()
    }

    /// Tab ids in creation order
    pub fn tab_ids(&self) -> &[TabId] {
        self.tabs.ids()
    }

    /// Edited tab ids, least recent first
    pub fn recently_used_tabs(&self) -> &[TabId] {
        &self.recently_used_tabs
    }

    /// Get the number of tabs
    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Defaults merged under every new tab's config
    pub fn defaults(&self) -> &TabConfig {
        &self.defaults
    }

    pub fn overflow_policy(&self) -> OverflowPolicy {
        self.overflow_policy
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Copy of the full session state
    pub fn snapshot(&self) -> SessionSnapshot {
        let (ids, entities) = self.tabs.clone().into_parts();
        SessionSnapshot {
            entities,
            ids,
            active_tab_id: self.active_tab_id,
            recently_used_tabs: self.recently_used_tabs.clone(),
            saved_at: None,
        }
    }

    /// Replace the session state with a snapshot after checking it is consistent.
    ///
    /// On error the current state is kept.
    pub fn restore(&mut self, snapshot: SessionSnapshot) -> Result<()> {
        let SessionSnapshot {
            entities,
            ids,
            active_tab_id,
            recently_used_tabs,
            ..
        } = snapshot;

        let tabs = TabStore::from_parts(ids, entities)?;
        check_state(&tabs, active_tab_id, &recently_used_tabs)?;

        log::info!("Restored session with {} tabs", tabs.len());
        self.tabs = tabs;
        self.active_tab_id = active_tab_id;
        self.recently_used_tabs = recently_used_tabs;
        Ok(())
    }

    /// Verify the store invariants hold
    pub fn check_invariants(&self) -> Result<()> {
        check_state(&self.tabs, self.active_tab_id, &self.recently_used_tabs)
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Bring `content` within `delimiter` according to the overflow policy
    fn fit(&self, content: &str, delimiter: &ContentDelimiter) -> Result<String> {
        if !delimiter::is_over_limit(content, delimiter) {
            return Ok(content.to_string());
        }
        match self.overflow_policy {
            OverflowPolicy::Reject => Err(SessionError::ContentTooLarge {
                limit: delimiter.limit,
                units: delimiter.units,
            }),
            OverflowPolicy::Truncate => {
                log::warn!(
                    "Truncating content of {} {} to {}",
                    delimiter::measure(content, delimiter.units),
                    delimiter.units,
                    delimiter.limit
                );
                Ok(delimiter::truncate(content, delimiter).into_owned())
            }
        }
    }

    /// Move `id` to the most-recent end of the recency list
    fn touch(&mut self, id: TabId) {
        self.recently_used_tabs.retain(|&recent| recent != id);
        self.recently_used_tabs.push(id);
    }
}

impl Default for TabManager {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_patch(patch: &TabConfigPatch) -> Result<()> {
    if let Some(delimiter) = patch.max_content_delimiter
        && delimiter.limit == 0
    {
        return Err(SessionError::InvalidInput(
            "Content limit must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn check_state(tabs: &TabStore, active: Option<TabId>, recency: &[TabId]) -> Result<()> {
    if let Some(id) = active
        && !tabs.contains(id)
    {
        return Err(SessionError::CorruptSnapshot(format!(
            "active tab {id} does not exist"
        )));
    }
    for (idx, id) in recency.iter().enumerate() {
        if !tabs.contains(*id) {
            return Err(SessionError::CorruptSnapshot(format!(
                "recently used tab {id} does not exist"
            )));
        }
        if recency[..idx].contains(id) {
            return Err(SessionError::CorruptSnapshot(format!(
                "tab {id} listed twice in recency"
            )));
        }
    }
    for tab in tabs.iter() {
        if tab.filename.trim().is_empty() {
            return Err(SessionError::CorruptSnapshot(format!(
                "tab {} has a blank filename",
                tab.id
            )));
        }
        if delimiter::is_over_limit(&tab.content, &tab.config.max_content_delimiter) {
            return Err(SessionError::CorruptSnapshot(format!(
                "tab {} content exceeds {}",
                tab.id, tab.config.max_content_delimiter
            )));
        }
    }
    Ok(())
}
