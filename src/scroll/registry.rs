//! The staged and unstaged lists and which of their diffs are active.

use std::path::{Path, PathBuf};

use crate::core::{ChangeFacet, FileEntry, StatusLists};

use super::{DiffView, ElementId};

/// A file entry in a list, optionally expanded into a diff view.
#[derive(Debug, Clone)]
pub struct ListEntry {
    /// The change record.
    pub file: FileEntry,
    /// Selected/expanded for viewing.
    pub active: bool,
    /// Rendered panes, present once the entry has been expanded.
    pub diff: Option<DiffView>,
}

impl ListEntry {
    /// A collapsed entry.
    pub fn new(file: FileEntry) -> Self {
        Self {
            file,
            active: false,
            diff: None,
        }
    }

    /// Expand with a diff view.
    pub fn activate(&mut self, diff: DiffView) {
        self.active = true;
        self.diff = Some(diff);
    }

    /// Collapse, dropping the diff view.
    pub fn deactivate(&mut self) -> Option<DiffView> {
        self.active = false;
        self.diff.take()
    }

    /// The diff view if the entry is currently active.
    pub fn active_diff(&self) -> Option<&DiffView> {
        if self.active {
            self.diff.as_ref()
        } else {
            None
        }
    }
}

/// One mounted list.
#[derive(Debug, Clone)]
pub struct DiffList {
    facet: ChangeFacet,
    entries: Vec<ListEntry>,
}

impl DiffList {
    /// Build a collapsed list.
    pub fn new(facet: ChangeFacet, files: impl IntoIterator<Item = FileEntry>) -> Self {
        Self {
            facet,
            entries: files.into_iter().map(ListEntry::new).collect(),
        }
    }

    /// Which facet this list shows.
    pub fn facet(&self) -> ChangeFacet {
        self.facet
    }

    /// Entries in display order.
    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    /// Mutable entry access.
    pub fn entry_mut(&mut self, idx: usize) -> Option<&mut ListEntry> {
        self.entries.get_mut(idx)
    }

    /// Mutable entries.
    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut ListEntry> {
        self.entries.iter_mut()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Active diffs in entry order.
    pub fn active_diffs(&self) -> impl Iterator<Item = &DiffView> {
        self.entries.iter().filter_map(ListEntry::active_diff)
    }
}

/// Tracks the selected repository and its two mounted lists.
#[derive(Debug, Clone, Default)]
pub struct DiffRegistry {
    repository: Option<PathBuf>,
    staged: Option<DiffList>,
    unstaged: Option<DiffList>,
}

impl DiffRegistry {
    /// No repository selected, nothing mounted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a repository. Lists of the previous one are unmounted.
    pub fn select_repository(&mut self, path: PathBuf) {
        self.repository = Some(path);
        self.staged = None;
        self.unstaged = None;
    }

    /// Selected repository.
    pub fn repository(&self) -> Option<&Path> {
        self.repository.as_deref()
    }

    /// Mount fresh lists from status.
    pub fn mount(&mut self, lists: StatusLists) {
        let StatusLists { index, working } = lists;
        self.staged = Some(DiffList::new(ChangeFacet::Staged, index));
        self.unstaged = Some(DiffList::new(ChangeFacet::Unstaged, working));
    }

    /// Mount two empty lists.
    pub fn reset_lists(&mut self) {
        self.mount(StatusLists::default());
    }

    /// A mounted list.
    pub fn list(&self, facet: ChangeFacet) -> Option<&DiffList> {
        match facet {
            ChangeFacet::Staged => self.staged.as_ref(),
            ChangeFacet::Unstaged => self.unstaged.as_ref(),
        }
    }

    /// A mounted list, mutably.
    pub fn list_mut(&mut self, facet: ChangeFacet) -> Option<&mut DiffList> {
        match facet {
            ChangeFacet::Staged => self.staged.as_mut(),
            ChangeFacet::Unstaged => self.unstaged.as_mut(),
        }
    }

    fn mounted(&self) -> impl Iterator<Item = &DiffList> {
        self.staged.iter().chain(self.unstaged.iter())
    }

    /// Active diffs: staged before unstaged, entry order within each.
    /// Empty when no repository is selected.
    pub fn active_diffs(&self) -> Vec<&DiffView> {
        if self.repository.is_none() {
            return Vec::new();
        }
        self.mounted().flat_map(DiffList::active_diffs).collect()
    }

    /// The active diff whose root element is `root`.
    pub fn find_active_mut(&mut self, root: ElementId) -> Option<&mut DiffView> {
        self.repository.as_ref()?;
        self.staged
            .iter_mut()
            .chain(self.unstaged.iter_mut())
            .flat_map(|list| list.entries.iter_mut())
            .filter(|entry| entry.active)
            .filter_map(|entry| entry.diff.as_mut())
            .find(|diff| diff.root == root)
    }

    /// Every built diff view, active or not, for layout.
    pub fn diffs_mut(&mut self) -> impl Iterator<Item = &mut DiffView> {
        self.staged
            .iter_mut()
            .chain(self.unstaged.iter_mut())
            .flat_map(|list| list.entries.iter_mut())
            .filter_map(|entry| entry.diff.as_mut())
    }
}
