//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes so a config
//! file only needs to mention the fields it overrides.

use crate::types::{ContentDelimiter, LogLevel, OverflowPolicy, TabConfig, Units};

// ── Primitive helpers ──────────────────────────────────────────────────────

pub fn bool_true() -> bool {
    true
}

// ── Tabs ───────────────────────────────────────────────────────────────────

pub fn max_tabs() -> usize {
    10
}

pub fn content_limit() -> usize {
    1000
}

pub fn content_units() -> Units {
    Units::Characters
}

pub fn max_content_delimiter() -> ContentDelimiter {
    ContentDelimiter {
        limit: content_limit(),
        units: content_units(),
    }
}

pub fn tab_config() -> TabConfig {
    TabConfig {
        is_closable: bool_true(),
        max_tabs: max_tabs(),
        max_content_delimiter: max_content_delimiter(),
    }
}

pub fn overflow_policy() -> OverflowPolicy {
    OverflowPolicy::Truncate
}

// ── Logging ────────────────────────────────────────────────────────────────

pub fn log_level() -> LogLevel {
    LogLevel::Warn
}
