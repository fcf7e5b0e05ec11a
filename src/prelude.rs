//! Common re-exports for convenient importing.
//!
//! # Example
//!
//! ```rust,ignore
//! use stagediff::prelude::*;
//! ```

pub use crate::core::{
    ChangeFacet, FileEntry, GitStatusProvider, RelPath, RepoError, Repository,
    RepositoryRegistry, SideBySide, StatusLists, StatusProvider,
};
pub use crate::scroll::{
    DiffRegistry, DiffView, DiffViewId, Document, ElementId, LegacyRenderer, ScrollEngine,
    WheelEvent,
};
