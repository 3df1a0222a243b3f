//! Configuration system for the tabdeck session core.
//!
//! This crate provides configuration loading, saving, and default values.
//! It includes:
//!
//! - Per-tab configuration (`TabConfig`) and call-site patches (`TabConfigPatch`)
//! - Content delimiters (`ContentDelimiter`, `Units`)
//! - The overflow policy applied to oversized content
//! - YAML config file persistence

pub mod config;
pub mod defaults;
pub mod error;
mod types;

pub use config::Config;
pub use error::ConfigError;
pub use types::{ContentDelimiter, LogLevel, OverflowPolicy, TabConfig, TabConfigPatch, Units};
