//! Core primitives for stagediff (no TUI dependencies).

mod diff;
mod discovery;
mod persist;
mod registry;
mod repo;
mod themes;
mod watcher;

pub use diff::*;
pub use discovery::*;
pub use persist::*;
pub use registry::*;
pub use repo::*;
pub use themes::*;
pub use watcher::*;
