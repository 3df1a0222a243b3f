//! Typed errors for session operations.
//!
//! Every variant is raised synchronously at the call site; nothing here is
//! retried. Deliberate no-ops (unknown ids, non-closable tabs) are not errors.

use tabdeck_config::Units;
use thiserror::Error;

/// Failure of a `TabManager` operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The payload was malformed, e.g. a blank filename.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Opening another tab would exceed the tab limit.
    #[error("Only {max_tabs} tabs allowed")]
    CapacityExceeded {
        /// Limit that was in effect for the rejected call
        max_tabs: usize,
    },

    /// Content exceeds its delimiter and the overflow policy is `Reject`.
    #[error("Content exceeds {limit} {units}")]
    ContentTooLarge {
        /// Configured limit
        limit: usize,
        /// Unit the limit is measured in
        units: Units,
    },

    /// A restored snapshot violates a store invariant.
    #[error("Corrupt session snapshot: {0}")]
    CorruptSnapshot(String),
}

/// Result alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
