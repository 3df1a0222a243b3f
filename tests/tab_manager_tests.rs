//! Tab manager lifecycle tests
//!
//! Covers capacity, closability, active-tab reselection after a close,
//! cyclic navigation, dirty/recency bookkeeping and view-state annotations.

mod common;

use common::{config_with_max_tabs, config_with_policy, manager_with_tabs, payload};
use serde_json::json;
use tabdeck::execution::CodeResponse;
use tabdeck::view_state::{CodeResponseField, ResizeLayout, serialize};
use tabdeck::delimiter::measure;
use tabdeck::{
    Annotation, Config, ContentDelimiter, Direction, OverflowPolicy, SessionError,
    TabConfigPatch, TabManager, Units, UpdateTab, ViewStatePatch,
};

// ============================================================================
// Capacity
// ============================================================================

#[test]
fn test_capacity_allows_exactly_max_tabs() {
    let mut manager = TabManager::with_config(&config_with_max_tabs(3)).unwrap();
    for i in 0..3 {
        manager
            .add_tab(payload(&format!("file{i}.js"), ""))
            .expect("add within capacity");
    }

    let err = manager.add_tab(payload("extra.js", "")).unwrap_err();
    assert_eq!(err, SessionError::CapacityExceeded { max_tabs: 3 });
    assert_eq!(err.to_string(), "Only 3 tabs allowed");
    assert_eq!(manager.tab_count(), 3);
}

#[test]
fn test_capacity_override_from_payload() {
    let (mut manager, _) = manager_with_tabs(&["a.js", "b.js"]);
    let err = manager
        .add_tab(payload("c.js", "").with_config(TabConfigPatch::default().with_max_tabs(2)))
        .unwrap_err();
    assert_eq!(err, SessionError::CapacityExceeded { max_tabs: 2 });
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut config = Config::default();
    config.tab_defaults.max_content_delimiter = ContentDelimiter::new(0, Units::Lines);
    assert!(matches!(
        TabManager::with_config(&config),
        Err(SessionError::InvalidInput(_))
    ));

    assert!(matches!(
        TabManager::with_config(&config_with_max_tabs(0)),
        Err(SessionError::InvalidInput(_))
    ));
}

#[test]
fn test_failed_add_leaves_state_unchanged() {
    let (mut manager, _) = manager_with_tabs(&["a.js"]);
    let before = manager.snapshot();
    assert!(manager.add_tab(payload("", "x")).is_err());
    assert_eq!(manager.snapshot(), before);
}

// ============================================================================
// Closing and reselection
// ============================================================================

#[test]
fn test_non_closable_tab_survives_remove() {
    let mut manager = TabManager::new();
    let pinned = manager
        .add_tab(payload("pinned.js", "x").with_config(TabConfigPatch::default().closable(false)))
        .unwrap();

    let before = manager.snapshot();
    manager.remove_tab(pinned);
    assert_eq!(manager.snapshot(), before);

    // close_all ignores closability
    manager.close_all_tabs();
    assert!(manager.is_empty());
    assert_eq!(manager.active_tab_id(), None);
    assert!(manager.recently_used_tabs().is_empty());
}

#[test]
fn test_remove_active_prefers_most_recently_edited() {
    let (mut manager, ids) = manager_with_tabs(&["a.js", "b.js", "c.js"]);
    let (a, b, c) = (ids[0], ids[1], ids[2]);

    for id in [a, c, b] {
        manager
            .update_tab(UpdateTab::new(id).content(format!("edit {id}")))
            .unwrap();
    }
    assert_eq!(manager.recently_used_tabs(), &[a, c, b]);

    manager.set_active_tab(b);
    manager.remove_tab(b);

    assert_eq!(manager.active_tab_id(), Some(c));
    assert_eq!(manager.tab_ids(), &[a, c]);
    assert_eq!(manager.recently_used_tabs(), &[a, c]);
}

#[test]
fn test_remove_active_without_recency_selects_predecessor() {
    let (mut manager, ids) = manager_with_tabs(&["a.js", "b.js", "c.js"]);
    manager.set_active_tab(ids[1]);
    manager.remove_tab(ids[1]);
    assert_eq!(manager.active_tab_id(), Some(ids[0]));
}

#[test]
fn test_remove_first_active_selects_new_first() {
    let (mut manager, ids) = manager_with_tabs(&["a.js", "b.js", "c.js"]);
    manager.set_active_tab(ids[0]);
    manager.remove_tab(ids[0]);
    assert_eq!(manager.active_tab_id(), Some(ids[1]));
}

#[test]
fn test_remove_inactive_keeps_selection() {
    let (mut manager, ids) = manager_with_tabs(&["a.js", "b.js", "c.js"]);
    manager.remove_tab(ids[0]);
    assert_eq!(manager.active_tab_id(), Some(ids[2]));
}

#[test]
fn test_remove_last_tab_clears_selection() {
    let (mut manager, ids) = manager_with_tabs(&["only.js"]);
    manager.remove_tab(ids[0]);
    assert!(manager.is_empty());
    assert_eq!(manager.active_tab_id(), None);
    manager.check_invariants().unwrap();
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn test_switch_cycles_through_all_tabs() {
    let (mut manager, ids) = manager_with_tabs(&["a.js", "b.js", "c.js", "d.js"]);
    manager.set_active_tab(ids[1]);

    let mut visited = Vec::new();
    for _ in 0..ids.len() {
        manager.switch_tab(Direction::Next);
        visited.push(manager.active_tab_id().unwrap());
    }
    assert_eq!(visited, vec![ids[2], ids[3], ids[0], ids[1]]);
}

#[test]
fn test_previous_inverts_next() {
    let (mut manager, ids) = manager_with_tabs(&["a.js", "b.js", "c.js"]);
    for &start in &ids {
        manager.set_active_tab(start);
        manager.switch_tab(Direction::Next);
        manager.switch_tab(Direction::Previous);
        assert_eq!(manager.active_tab_id(), Some(start));
    }

    manager.set_active_tab(ids[0]);
    manager.switch_tab(Direction::Previous);
    assert_eq!(manager.active_tab_id(), Some(ids[2]));
}

#[test]
fn test_set_active_unknown_id_is_ignored() {
    let (mut manager, ids) = manager_with_tabs(&["a.js"]);
    manager.set_active_tab(tabdeck::TabId::new());
    assert_eq!(manager.active_tab_id(), Some(ids[0]));
}

// ============================================================================
// Dirty state and recency
// ============================================================================

#[test]
fn test_identical_content_leaves_dirty_and_recency() {
    let (mut manager, ids) = manager_with_tabs(&["a.js", "b.js"]);
    manager
        .update_tab(UpdateTab::new(ids[0]).content(""))
        .unwrap();

    assert!(!manager.get_tab(ids[0]).unwrap().is_dirty);
    assert!(manager.recently_used_tabs().is_empty());
}

#[test]
fn test_changed_content_marks_dirty_and_moves_to_tail() {
    let (mut manager, ids) = manager_with_tabs(&["a.js", "b.js"]);
    manager
        .update_tab(UpdateTab::new(ids[0]).content("let a = 1;"))
        .unwrap();
    manager
        .update_tab(UpdateTab::new(ids[1]).content("let b = 2;"))
        .unwrap();
    manager
        .update_tab(UpdateTab::new(ids[0]).content("let a = 3;"))
        .unwrap();

    assert!(manager.get_tab(ids[0]).unwrap().is_dirty);
    assert_eq!(manager.recently_used_tabs(), &[ids[1], ids[0]]);
    // Editing does not change the selection
    assert_eq!(manager.active_tab_id(), Some(ids[1]));
}

#[test]
fn test_dirty_is_sticky() {
    let (mut manager, ids) = manager_with_tabs(&["a.js"]);
    manager
        .update_tab(UpdateTab::new(ids[0]).content("x"))
        .unwrap();
    manager
        .update_tab(UpdateTab::new(ids[0]).content(""))
        .unwrap();
    let tab = manager.get_tab(ids[0]).unwrap();
    assert_eq!(tab.content, "");
    assert!(tab.is_dirty);
}

#[test]
fn test_rename_does_not_touch_recency() {
    let (mut manager, ids) = manager_with_tabs(&["a.js"]);
    manager
        .update_tab(UpdateTab::new(ids[0]).filename("renamed.js"))
        .unwrap();
    let tab = manager.get_tab(ids[0]).unwrap();
    assert_eq!(tab.filename, "renamed.js");
    assert!(!tab.is_dirty);
    assert!(manager.recently_used_tabs().is_empty());
}

// ============================================================================
// Content limits
// ============================================================================

#[test]
fn test_update_truncates_to_tab_delimiter() {
    let mut manager = TabManager::new();
    let id = manager
        .add_tab(payload("a.js", "").with_config(
            TabConfigPatch::default().with_delimiter(ContentDelimiter::new(5, Units::Characters)),
        ))
        .unwrap();

    manager
        .update_tab(UpdateTab::new(id).content("héllo world"))
        .unwrap();
    assert_eq!(manager.get_tab(id).unwrap().content, "héllo");
}

#[test]
fn test_character_limit_counts_utf16_units() {
    let mut manager = TabManager::new();
    let id = manager
        .add_tab(payload("emoji.txt", "😀😀😀").with_config(
            TabConfigPatch::default().with_delimiter(ContentDelimiter::new(4, Units::Characters)),
        ))
        .unwrap();

    let tab = manager.get_tab(id).unwrap();
    assert_eq!(tab.content, "😀😀");
    assert_eq!(measure(&tab.content, Units::Characters), 4);

    manager
        .update_tab(UpdateTab::new(id).content("a😀b"))
        .unwrap();
    assert_eq!(manager.get_tab(id).unwrap().content, "a😀b");
    manager
        .update_tab(UpdateTab::new(id).content("ab😀c"))
        .unwrap();
    assert_eq!(manager.get_tab(id).unwrap().content, "ab😀");
}

#[test]
fn test_update_with_looser_delimiter_keeps_content() {
    let mut manager = TabManager::new();
    let id = manager
        .add_tab(payload("a.js", "").with_config(
            TabConfigPatch::default().with_delimiter(ContentDelimiter::new(5, Units::Characters)),
        ))
        .unwrap();

    manager
        .update_tab(UpdateTab::new(id).content("0123456789").config(
            TabConfigPatch::default().with_delimiter(ContentDelimiter::new(20, Units::Characters)),
        ))
        .unwrap();

    let tab = manager.get_tab(id).unwrap();
    assert_eq!(tab.content, "0123456789");
    assert_eq!(tab.config.max_content_delimiter.limit, 20);
}

#[test]
fn test_reject_policy_refuses_oversized_content() {
    let mut manager = TabManager::with_config(&config_with_policy(OverflowPolicy::Reject)).unwrap();
    let limit = TabConfigPatch::default().with_delimiter(ContentDelimiter::new(1, Units::Lines));

    let err = manager
        .add_tab(payload("a.js", "one\ntwo").with_config(limit))
        .unwrap_err();
    assert_eq!(
        err,
        SessionError::ContentTooLarge {
            limit: 1,
            units: Units::Lines
        }
    );
    assert!(manager.is_empty());

    let id = manager
        .add_tab(payload("a.js", "one").with_config(limit))
        .unwrap();
    let before = manager.snapshot();
    assert!(
        manager
            .update_tab(UpdateTab::new(id).content("one\ntwo"))
            .is_err()
    );
    assert_eq!(manager.snapshot(), before);
}

// ============================================================================
// View-state and annotations
// ============================================================================

#[test]
fn test_mounted_annotation_is_idempotent() {
    let (mut once, ids) = manager_with_tabs(&["a.js"]);
    let mut twice = once.clone();

    once.annotate(ids[0], Annotation::Mounted(true));
    twice.annotate(ids[0], Annotation::Mounted(true));
    twice.annotate(ids[0], Annotation::Mounted(true));

    assert_eq!(once.snapshot(), twice.snapshot());
}

#[test]
fn test_code_response_lifecycle() {
    let (mut manager, ids) = manager_with_tabs(&["main.js"]);
    let id = ids[0];

    manager.set_code_response(id, CodeResponseField::running());
    let view_state = manager.get_tab(id).unwrap().view_state.clone().unwrap();
    assert!(view_state.code_response().unwrap().is_running);

    let response = CodeResponse {
        stdout: "hello\n".to_string(),
        ..CodeResponse::default()
    };
    manager.set_code_response(id, CodeResponseField::finished(response.clone(), "0.12s"));

    let tab = manager.get_tab(id).unwrap();
    let stored = tab.view_state.as_ref().unwrap().code_response().unwrap();
    assert!(!stored.is_running);
    assert_eq!(stored.response, response);
    assert_eq!(stored.time.as_deref(), Some("0.12s"));
    // Annotations never count as edits
    assert!(!tab.is_dirty);
    assert!(manager.recently_used_tabs().is_empty());
}

#[test]
fn test_layout_and_custom_fields() {
    let (mut manager, ids) = manager_with_tabs(&["main.js"]);
    let layout = ResizeLayout {
        vertical: vec![50.0, 50.0],
        snapshot: vec![70.0, 30.0],
    };
    manager.set_resize_layout(ids[0], layout.clone());
    manager.annotate(
        ids[0],
        Annotation::Field {
            key: "theme".to_string(),
            value: json!("dark"),
        },
    );

    let view_state = manager.get_tab(ids[0]).unwrap().view_state.clone().unwrap();
    assert_eq!(view_state.resize_layout(), Some(layout));
    assert_eq!(view_state.field("theme"), Some(&json!("dark")));
}

#[test]
fn test_annotate_unknown_tab_is_ignored() {
    let (mut manager, _) = manager_with_tabs(&["a.js"]);
    let before = manager.snapshot();
    manager.annotate(tabdeck::TabId::new(), Annotation::Mounted(true));
    assert_eq!(manager.snapshot(), before);
}

#[test]
fn test_view_state_patch_replaces_blob_without_edit() {
    let (mut manager, ids) = manager_with_tabs(&["a.js"]);
    let mut blob = serialize(None);
    blob.view_state.scroll_top = 120.0;

    manager
        .update_tab(UpdateTab::new(ids[0]).view_state(ViewStatePatch::with_state(blob.clone())))
        .unwrap();

    let tab = manager.get_tab(ids[0]).unwrap();
    assert_eq!(tab.view_state.as_ref().unwrap().state, blob);
    assert!(!tab.is_dirty);
}

#[test]
fn test_tab_without_view_state() {
    let (mut manager, ids) = manager_with_tabs(&["a.js"]);
    let mut snapshot = manager.snapshot();
    snapshot
        .entities
        .get_mut(&ids[0])
        .unwrap()
        .view_state = None;
    manager.restore(snapshot).unwrap();

    // Annotations need an existing view-state
    manager.set_mounted(ids[0], true);
    assert!(manager.get_tab(ids[0]).unwrap().view_state.is_none());

    // A view-state patch creates one
    let patch = ViewStatePatch {
        is_mounted: Some(true),
        ..ViewStatePatch::default()
    };
    manager
        .update_tab(UpdateTab::new(ids[0]).view_state(patch))
        .unwrap();
    let view_state = manager.get_tab(ids[0]).unwrap().view_state.clone().unwrap();
    assert!(view_state.is_mounted);
    assert!(view_state.resize_layout().is_some());
}
