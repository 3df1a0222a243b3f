//! Typed error variants for the tabdeck-config crate.
//!
//! Provides structured error types for config I/O and validation operations.
//! `Config::load_from` and `Config::save_to` still return `anyhow::Result`;
//! callers that want to match on a failure mode can downcast:
//!
//! ```rust,no_run
//! use tabdeck_config::ConfigError;
//!
//! fn check_load_err(e: &anyhow::Error) {
//!     if let Some(cfg_err) = e.downcast_ref::<ConfigError>() {
//!         match cfg_err {
//!             ConfigError::Io(io) => eprintln!("I/O error: {io}"),
//!             ConfigError::Parse(p) => eprintln!("YAML parse error: {p}"),
//!             ConfigError::Validation(msg) => eprintln!("Validation: {msg}"),
//!             ConfigError::UnsupportedUnit(unit) => eprintln!("Bad unit: {unit}"),
//!         }
//!     }
//! }
//! ```

use thiserror::Error;

/// Errors that can occur when loading, saving or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing the config file.
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file contained invalid YAML that could not be parsed.
    #[error("YAML parse error in config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    ///
    /// The inner string describes which field is invalid and why.
    #[error("Config validation error: {0}")]
    Validation(String),

    /// A content delimiter named a unit outside `characters`, `bytes`, `lines`.
    ///
    /// This is a programming or configuration error, never a user-input one.
    #[error("Unsupported unit: {0}")]
    UnsupportedUnit(String),
}
