//! Top-level `Config` struct, validation, and YAML persistence.
//!
//! Covers:
//! - `Config` with serde defaults for every field
//! - `load` / `load_from` / `save` / `save_to` (YAML file I/O with atomic write)
//! - XDG-style path helpers (`config_path`, `config_dir`)

use crate::error::ConfigError;
use crate::types::{LogLevel, OverflowPolicy, TabConfig};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for the session core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Defaults merged under every tab's own config
    #[serde(default = "crate::defaults::tab_config")]
    pub tab_defaults: TabConfig,

    /// Behaviour when content exceeds its delimiter
    #[serde(default = "crate::defaults::overflow_policy")]
    pub overflow_policy: OverflowPolicy,

    /// Level for the debug log file
    #[serde(default = "crate::defaults::log_level")]
    pub log_level: LogLevel,

    /// Where the session snapshot is saved (defaults to the config directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_defaults: crate::defaults::tab_config(),
            overflow_policy: crate::defaults::overflow_policy(),
            log_level: crate::defaults::log_level(),
            session_file: None,
        }
    }
}

impl Config {
    /// Check semantic constraints serde cannot express.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.tab_defaults.max_tabs == 0 {
            return Err(ConfigError::Validation(
                "tab_defaults.max_tabs must be at least 1".to_string(),
            ));
        }
        if self.tab_defaults.max_content_delimiter.limit == 0 {
            return Err(ConfigError::Validation(
                "tab_defaults.max_content_delimiter.limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a YAML document
    pub fn from_yaml(contents: &str) -> std::result::Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml_ng::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default path, or defaults if it does not exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, or defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(ConfigError::from)?;
        let config = Self::from_yaml(&contents)?;
        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::from)?;
        }

        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::from)?;

        // Atomic save: write to temp file then rename
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(ConfigError::from)?;
        fs::rename(&temp_path, path).map_err(ConfigError::from)?;

        log::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Render as YAML for display
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self).map_err(ConfigError::from)?)
    }

    /// Get the configuration directory path: `~/.config/tabdeck`
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir()
                .map(|dir| dir.join("tabdeck"))
                .unwrap_or_else(|| PathBuf::from("."))
        }
        #[cfg(not(target_os = "windows"))]
        {
            dirs::home_dir()
                .map(|home| home.join(".config").join("tabdeck"))
                .unwrap_or_else(|| PathBuf::from("."))
        }
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Session snapshot path: the configured override or `<config dir>/session.json`
    pub fn session_path(&self) -> PathBuf {
        self.session_file
            .clone()
            .unwrap_or_else(|| Self::config_dir().join("session.json"))
    }
}
