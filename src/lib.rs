//! stagediff - A terminal review client for staged and unstaged git changes.
//!
//! Expanded files are rendered as side-by-side diffs whose twin panes
//! scroll in lockstep. The scrolling engine lives in [`scroll`] and has no
//! terminal dependencies.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use stagediff::prelude::*;
//!
//! let provider = GitStatusProvider::new();
//! let entries = provider.status(std::path::Path::new("."))?;
//! let lists = StatusLists::partition(entries);
//! ```

#![deny(missing_docs)]

pub mod core;
pub mod logging;
pub mod metrics;
pub mod prelude;
pub mod scroll;
pub mod theme;
pub mod ui;
