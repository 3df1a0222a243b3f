//! Conversion between the editor's native view-state and the stored blob.
//!
//! The native shape mirrors what the embedded editor hands out on every
//! content change: most fields may be missing. The stored shape is fully
//! populated so a restored snapshot never contains `null`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A line/column pair. Editor positions are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub line_number: u32,
    pub column: u32,
}

impl Position {
    /// Top-left of the document
    pub const START: Position = Position {
        line_number: 1,
        column: 1,
    };
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

/// One cursor and its selection anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorState {
    pub in_selection_mode: bool,
    pub selection_start: Position,
    pub position: Position,
}

/// Scroll offsets and the first visible position
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollState {
    pub scroll_top: f64,
    pub scroll_top_without_view_zones: f64,
    pub scroll_left: f64,
    pub first_position: Position,
    pub first_position_delta_top: f64,
}

/// Stored view-state blob: cursors, scroll, and per-contribution (fold) state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorViewState {
    #[serde(default)]
    pub cursor_state: Vec<CursorState>,
    #[serde(default)]
    pub view_state: ScrollState,
    #[serde(default)]
    pub contributions_state: Map<String, Value>,
}

impl EditorViewState {
    /// Encode as the JSON string form used by the editor bridge
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decode from the JSON string form, filling missing fields with defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// Native (editor-side) shape
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativePosition {
    #[serde(default)]
    pub line_number: Option<u32>,
    #[serde(default)]
    pub column: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeCursorState {
    #[serde(default)]
    pub in_selection_mode: Option<bool>,
    #[serde(default)]
    pub selection_start: Option<NativePosition>,
    #[serde(default)]
    pub position: Option<NativePosition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeScrollState {
    #[serde(default)]
    pub scroll_top: Option<f64>,
    #[serde(default)]
    pub scroll_top_without_view_zones: Option<f64>,
    #[serde(default)]
    pub scroll_left: Option<f64>,
    #[serde(default)]
    pub first_position: Option<NativePosition>,
    #[serde(default)]
    pub first_position_delta_top: Option<f64>,
}

/// View-state as produced by the editor widget.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeViewState {
    #[serde(default)]
    pub cursor_state: Option<Vec<NativeCursorState>>,
    #[serde(default)]
    pub view_state: Option<NativeScrollState>,
    #[serde(default)]
    pub contributions_state: Option<Map<String, Value>>,
}

fn project_position(native: Option<&NativePosition>) -> Position {
    match native {
        Some(pos) => Position {
            line_number: pos.line_number.unwrap_or(Position::START.line_number),
            column: pos.column.unwrap_or(Position::START.column),
        },
        None => Position::START,
    }
}

fn native_position(pos: Position) -> NativePosition {
    NativePosition {
        line_number: Some(pos.line_number),
        column: Some(pos.column),
    }
}

/// Project the editor's view-state into the stored blob.
///
/// `None` yields [`EditorViewState::default`]. Missing scroll offsets become
/// `0`, missing positions become line 1 column 1, missing flags `false`.
pub fn serialize(native: Option<&NativeViewState>) -> EditorViewState {
    let Some(native) = native else {
        return EditorViewState::default();
    };

    let cursor_state = native
        .cursor_state
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|cursor| CursorState {
            in_selection_mode: cursor.in_selection_mode.unwrap_or(false),
            selection_start: project_position(cursor.selection_start.as_ref()),
            position: project_position(cursor.position.as_ref()),
        })
        .collect();

    let view_state = native
        .view_state
        .as_ref()
        .map(|scroll| ScrollState {
            scroll_top: scroll.scroll_top.unwrap_or(0.0),
            scroll_top_without_view_zones: scroll.scroll_top_without_view_zones.unwrap_or(0.0),
            scroll_left: scroll.scroll_left.unwrap_or(0.0),
            first_position: project_position(scroll.first_position.as_ref()),
            first_position_delta_top: scroll.first_position_delta_top.unwrap_or(0.0),
        })
        .unwrap_or_default();

    EditorViewState {
        cursor_state,
        view_state,
        contributions_state: native.contributions_state.clone().unwrap_or_default(),
    }
}

/// Read a stored blob back into the editor's shape, every field populated.
pub fn restore(stored: &EditorViewState) -> NativeViewState {
    NativeViewState {
        cursor_state: Some(
            stored
                .cursor_state
                .iter()
                .map(|cursor| NativeCursorState {
                    in_selection_mode: Some(cursor.in_selection_mode),
                    selection_start: Some(native_position(cursor.selection_start)),
                    position: Some(native_position(cursor.position)),
                })
                .collect(),
        ),
        view_state: Some(NativeScrollState {
            scroll_top: Some(stored.view_state.scroll_top),
            scroll_top_without_view_zones: Some(stored.view_state.scroll_top_without_view_zones),
            scroll_left: Some(stored.view_state.scroll_left),
            first_position: Some(native_position(stored.view_state.first_position)),
            first_position_delta_top: Some(stored.view_state.first_position_delta_top),
        }),
        contributions_state: Some(stored.contributions_state.clone()),
    }
}
