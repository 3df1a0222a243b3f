//! Editor view-state held by each tab.
//!
//! A [`ViewState`] bundles three things:
//! - `state`: the codec-produced [`EditorViewState`] blob (cursor/scroll/fold)
//! - `state_fields`: an opaque key → JSON map the session core merges into but
//!   never interprets (last run output, panel layout, caller flags)
//! - `is_mounted`: whether an editor widget currently shows the tab

pub mod codec;

pub use codec::{
    CursorState, EditorViewState, NativeCursorState, NativePosition, NativeScrollState,
    NativeViewState, Position, ScrollState, restore, serialize,
};

use crate::execution::CodeResponse;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Key under which the last execution result is stored
pub const CODE_RESPONSE_KEY: &str = "codeResponse";

/// Key under which the output panel layout is stored
pub const RESIZE_LAYOUT_KEY: &str = "resizeLayout";

/// Opaque caller-owned fields attached to a tab's view-state
pub type StateFields = BTreeMap<String, Value>;

/// Last execution result plus run bookkeeping, as shown in the output panel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeResponseField {
    #[serde(flatten)]
    pub response: CodeResponse,
    /// Human-readable duration of the run, set once it finishes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default)]
    pub is_running: bool,
}

impl CodeResponseField {
    /// Marker stored while a run is in flight
    pub fn running() -> Self {
        Self {
            response: CodeResponse::default(),
            time: None,
            is_running: true,
        }
    }

    /// Result of a completed run
    pub fn finished(response: CodeResponse, time: impl Into<String>) -> Self {
        Self {
            response,
            time: Some(time.into()),
            is_running: false,
        }
    }
}

/// Split sizes (percentages) of the editor/output panels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResizeLayout {
    pub vertical: Vec<f64>,
    pub snapshot: Vec<f64>,
}

impl Default for ResizeLayout {
    fn default() -> Self {
        Self {
            vertical: vec![70.0, 30.0],
            snapshot: vec![70.0, 30.0],
        }
    }
}

/// Per-tab editor view-state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    #[serde(default)]
    pub state: EditorViewState,
    #[serde(default)]
    pub state_fields: StateFields,
    #[serde(default)]
    pub is_mounted: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        let mut state_fields = StateFields::new();
        if let Ok(value) = serde_json::to_value(CodeResponse::default()) {
            state_fields.insert(CODE_RESPONSE_KEY.to_string(), value);
        }
        if let Ok(value) = serde_json::to_value(ResizeLayout::default()) {
            state_fields.insert(RESIZE_LAYOUT_KEY.to_string(), value);
        }
        Self {
            state: EditorViewState::default(),
            state_fields,
            is_mounted: false,
        }
    }
}

impl ViewState {
    /// Replace one opaque field
    pub fn set_field(&mut self, key: impl Into<String>, value: Value) {
        self.state_fields.insert(key.into(), value);
    }

    /// Raw opaque field
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.state_fields.get(key)
    }

    /// Typed read of the last execution result, if one is stored and well-formed
    pub fn code_response(&self) -> Option<CodeResponseField> {
        self.field(CODE_RESPONSE_KEY)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Typed read of the panel layout, if one is stored and well-formed
    pub fn resize_layout(&self) -> Option<ResizeLayout> {
        self.field(RESIZE_LAYOUT_KEY)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }
}

/// Shallow update of a [`ViewState`]: each `Some` field replaces or merges.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewStatePatch {
    /// Replaces the codec blob
    pub state: Option<EditorViewState>,
    /// Merged key-by-key into `state_fields`
    pub state_fields: Option<StateFields>,
    /// Replaces the mounted flag
    pub is_mounted: Option<bool>,
}

impl ViewStatePatch {
    /// Patch that only replaces the codec blob
    pub fn with_state(state: EditorViewState) -> Self {
        Self {
            state: Some(state),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_none() && self.state_fields.is_none() && self.is_mounted.is_none()
    }

    pub(crate) fn apply_to(self, view_state: &mut ViewState) {
        if let Some(state) = self.state {
            view_state.state = state;
        }
        if let Some(fields) = self.state_fields {
            view_state.state_fields.extend(fields);
        }
        if let Some(is_mounted) = self.is_mounted {
            view_state.is_mounted = is_mounted;
        }
    }
}

/// Caller data attached to a tab without touching its content.
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    /// Execution result (or in-flight marker) for the output panel
    CodeResponse(CodeResponseField),
    /// Output panel split sizes
    Layout(ResizeLayout),
    /// Whether an editor widget currently shows the tab
    Mounted(bool),
    /// Any other opaque field
    Field { key: String, value: Value },
}

impl Annotation {
    pub(crate) fn apply_to(self, view_state: &mut ViewState) {
        match self {
            Annotation::CodeResponse(field) => match serde_json::to_value(field) {
                Ok(value) => view_state.set_field(CODE_RESPONSE_KEY, value),
                Err(e) => log::warn!("Dropping unserializable code response: {e}"),
            },
            Annotation::Layout(layout) => match serde_json::to_value(layout) {
                Ok(value) => view_state.set_field(RESIZE_LAYOUT_KEY, value),
                Err(e) => log::warn!("Dropping unserializable layout: {e}"),
            },
            Annotation::Mounted(is_mounted) => view_state.is_mounted = is_mounted,
            Annotation::Field { key, value } => view_state.set_field(key, value),
        }
    }
}
