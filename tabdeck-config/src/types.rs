//! Per-tab configuration types.
//!
//! `TabConfig` and `ContentDelimiter` are embedded in persisted session
//! snapshots, which use the browser store's camelCase keys. The snake_case
//! spellings are accepted as aliases so YAML config files read naturally.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Content delimiter
// ============================================================================

/// Unit a content delimiter is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Units {
    /// UTF-16 code units (the length a browser editor reports)
    #[default]
    Characters,
    /// Bytes of the UTF-8 encoding
    Bytes,
    /// `\n`-delimited segments
    Lines,
}

impl Units {
    /// Name as written in config files and snapshots
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Characters => "characters",
            Units::Bytes => "bytes",
            Units::Lines => "lines",
        }
    }

    /// All units, for CLI help and iteration
    pub fn all() -> &'static [Units] {
        &[Units::Characters, Units::Bytes, Units::Lines]
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "characters" => Ok(Units::Characters),
            "bytes" => Ok(Units::Bytes),
            "lines" => Ok(Units::Lines),
            _ => Err(ConfigError::UnsupportedUnit(s.to_string())),
        }
    }
}

impl TryFrom<String> for Units {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Upper bound on a tab's content, as a `{ limit, units }` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDelimiter {
    pub limit: usize,
    pub units: Units,
}

impl ContentDelimiter {
    pub fn new(limit: usize, units: Units) -> Self {
        Self { limit, units }
    }
}

impl Default for ContentDelimiter {
    fn default() -> Self {
        crate::defaults::max_content_delimiter()
    }
}

impl fmt::Display for ContentDelimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.limit, self.units)
    }
}

// ============================================================================
// Tab configuration
// ============================================================================

/// Fully resolved configuration carried by every tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabConfig {
    /// Whether the tab may be closed by `remove_tab`
    #[serde(default = "crate::defaults::bool_true", alias = "is_closable")]
    pub is_closable: bool,

    /// Maximum number of open tabs in effect when this tab was created
    #[serde(default = "crate::defaults::max_tabs", alias = "max_tabs")]
    pub max_tabs: usize,

    /// Bound on the tab's content
    #[serde(
        default = "crate::defaults::max_content_delimiter",
        alias = "max_content_delimiter"
    )]
    pub max_content_delimiter: ContentDelimiter,
}

impl Default for TabConfig {
    fn default() -> Self {
        crate::defaults::tab_config()
    }
}

impl TabConfig {
    /// Apply a patch on top of this config. Fields set in `patch` win.
    pub fn merged(&self, patch: &TabConfigPatch) -> TabConfig {
        TabConfig {
            is_closable: patch.is_closable.unwrap_or(self.is_closable),
            max_tabs: patch.max_tabs.unwrap_or(self.max_tabs),
            max_content_delimiter: patch
                .max_content_delimiter
                .unwrap_or(self.max_content_delimiter),
        }
    }
}

/// Partial tab configuration supplied at a call site.
///
/// Precedence when resolving a value: this patch, then the tab's stored
/// config, then the global defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabConfigPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_closable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tabs: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_content_delimiter: Option<ContentDelimiter>,
}

impl TabConfigPatch {
    pub fn is_empty(&self) -> bool {
        self.is_closable.is_none() && self.max_tabs.is_none() && self.max_content_delimiter.is_none()
    }

    pub fn closable(mut self, is_closable: bool) -> Self {
        self.is_closable = Some(is_closable);
        self
    }

    pub fn with_max_tabs(mut self, max_tabs: usize) -> Self {
        self.max_tabs = Some(max_tabs);
        self
    }

    pub fn with_delimiter(mut self, delimiter: ContentDelimiter) -> Self {
        self.max_content_delimiter = Some(delimiter);
        self
    }
}

/// What to do with content that exceeds its delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Silently cut the content down to the limit
    #[default]
    Truncate,
    /// Refuse the whole operation
    Reject,
}

// ============================================================================
// Logging
// ============================================================================

/// Log level for the debug log file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging (log file not created)
    Off,
    /// Errors only
    Error,
    /// Warnings and errors
    #[default]
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Most verbose
    Trace,
}

impl LogLevel {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}
