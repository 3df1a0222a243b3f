// Library exports for the tabdeck binary, tests and embedding hosts
//
// # Ownership
//
// All session state lives in a single `tab::TabManager` and is mutated only
// through `&mut self` methods. Hosts that need to share it across threads
// wrap the manager in one lock (`parking_lot::Mutex` is what `debug` uses
// for the log sink) rather than locking individual tabs.

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod debug;

pub mod cli;
pub mod delimiter;
pub mod error;
pub mod execution;
pub mod session;
pub mod tab;
pub mod view_state;

pub use error::{Result, SessionError};
pub use session::SessionSnapshot;
pub use tab::{AddTab, Direction, Metadata, Tab, TabId, TabManager, UpdateTab};
pub use tabdeck_config::{Config, ContentDelimiter, OverflowPolicy, TabConfig, TabConfigPatch, Units};
pub use view_state::{Annotation, ViewState, ViewStatePatch};
