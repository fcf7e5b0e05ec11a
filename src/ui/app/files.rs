//! File lists: status refresh, expansion, cursor, staging and layout.

use std::path::{Path, PathBuf};

use ratatui::layout::Rect;

use crate::core::{ChangeFacet, RelPath, RepoError, SideBySide, StatusLists};
use crate::metrics::FrameTimer;
use crate::scroll::{DiffView, DiffViewId, ElementId, Extent};
use crate::ui::render::GUTTER_WIDTH;

use super::{App, DocRow};

impl App {
    fn active_root(&self) -> Option<PathBuf> {
        self.diffs.repository().map(Path::to_path_buf)
    }

    fn load_content(
        &self,
        root: &Path,
        path: &RelPath,
        facet: ChangeFacet,
    ) -> Result<SideBySide, RepoError> {
        let (old, new) = self.provider.load_pair(root, path, facet)?;
        Ok(SideBySide::compute(&old, &new))
    }

    /// Reload status of the active repository.
    ///
    /// Expanded entries that still exist keep their view (and scroll
    /// offsets) with fresh content. On failure both lists are emptied and
    /// the repository stays selected.
    pub fn refresh_status(&mut self) {
        let Some(root) = self.active_root() else {
            return;
        };
        let mut timer = FrameTimer::start("refresh_status");

        match self.provider.status(&root) {
            Ok(entries) => {
                timer.record(entries.len());
                let expanded = self.take_expanded();
                self.diffs.mount(StatusLists::partition(entries));
                for (facet, path, view) in expanded {
                    self.restore_expanded(&root, facet, &path, view);
                }
                self.repos.mark_loaded(&root);
                self.ui.error = None;
            }
            Err(e) => {
                log::warn!("status failed for {}: {}", root.display(), e);
                self.ui.error = Some(format!("Status failed: {}", e));
                self.diffs.reset_lists();
            }
        }

        self.clamp_cursor();
        self.layout.stale = true;
        self.ui.dirty = true;
    }

    /// Manual refresh.
    pub fn manual_reload(&mut self) {
        if self.diffs.repository().is_none() {
            self.ui.status = Some("No repository selected".to_string());
        } else {
            self.refresh_status();
            if self.ui.error.is_none() {
                self.ui.status = Some("Refreshed".to_string());
            }
        }
        self.ui.dirty = true;
    }

    fn take_expanded(&mut self) -> Vec<(ChangeFacet, RelPath, DiffView)> {
        let mut expanded = Vec::new();
        for facet in ChangeFacet::ALL {
            let Some(list) = self.diffs.list_mut(facet) else {
                continue;
            };
            for entry in list.entries_mut() {
                if !entry.active {
                    continue;
                }
                let path = entry.file.path.clone();
                if let Some(view) = entry.deactivate() {
                    expanded.push((facet, path, view));
                }
            }
        }
        expanded
    }

    fn restore_expanded(&mut self, root: &Path, facet: ChangeFacet, path: &RelPath, view: DiffView) {
        let Some(idx) = self
            .diffs
            .list(facet)
            .and_then(|l| l.entries().iter().position(|e| &e.file.path == path))
        else {
            log::debug!("dropping diff for {}: no longer {:?}", path, facet);
            return;
        };

        let content = match self.load_content(root, path, facet) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("failed to reload {}: {}", path, e);
                return;
            }
        };
        if let Some(entry) = self.diffs.list_mut(facet).and_then(|l| l.entry_mut(idx)) {
            entry.activate(view.with_content(content));
        }
    }

    /// Expand the entry, loading its diff.
    pub fn expand(&mut self, facet: ChangeFacet, idx: usize) {
        let Some(root) = self.active_root() else {
            return;
        };
        let Some(path) = self.entry(facet, idx).map(|e| e.file.path.clone()) else {
            return;
        };

        match self.load_content(&root, &path, facet) {
            Ok(content) => {
                let id = self.allocate_view_id();
                let view = DiffView::new(DiffViewId(id), ElementId(id)).with_content(content);
                if let Some(entry) = self.diffs.list_mut(facet).and_then(|l| l.entry_mut(idx)) {
                    entry.activate(view);
                }
                log::debug!("expanded {} ({:?})", path, facet);
            }
            Err(e) => {
                log::warn!("failed to load {}: {}", path, e);
                self.ui.error = Some(format!("{}: {}", path, e));
            }
        }
        self.layout.stale = true;
        self.ui.dirty = true;
    }

    /// Collapse the entry, dropping its diff.
    pub fn collapse(&mut self, facet: ChangeFacet, idx: usize) {
        if let Some(entry) = self.diffs.list_mut(facet).and_then(|l| l.entry_mut(idx)) {
            entry.deactivate();
        }
        self.layout.stale = true;
        self.ui.dirty = true;
    }

    /// Expand or collapse the entry under the cursor.
    pub fn toggle_selected(&mut self) {
        let Some((facet, idx)) = self.selected_entry() else {
            return;
        };
        let active = self.entry(facet, idx).is_some_and(|e| e.active);
        if active {
            self.collapse(facet, idx);
        } else {
            self.expand(facet, idx);
        }
    }

    /// Move the cursor down.
    pub fn select_next(&mut self) {
        if self.cursor + 1 < self.selectable_entries().len() {
            self.cursor += 1;
            self.follow_cursor = true;
            self.ui.dirty = true;
        }
    }

    /// Move the cursor up.
    pub fn select_prev(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.follow_cursor = true;
            self.ui.dirty = true;
        }
    }

    /// Put the cursor on an entry.
    pub fn select_entry(&mut self, facet: ChangeFacet, idx: usize) {
        if let Some(pos) = self
            .selectable_entries()
            .iter()
            .position(|&e| e == (facet, idx))
        {
            self.cursor = pos;
            self.ui.dirty = true;
        }
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self
            .cursor
            .min(self.selectable_entries().len().saturating_sub(1));
    }

    /// Stage the entry under the cursor.
    pub fn stage_selected(&mut self) {
        self.change_index(ChangeFacet::Unstaged);
    }

    /// Unstage the entry under the cursor.
    pub fn unstage_selected(&mut self) {
        self.change_index(ChangeFacet::Staged);
    }

    /// Move the selected entry out of `from` into the other list.
    fn change_index(&mut self, from: ChangeFacet) {
        let Some(root) = self.active_root() else {
            return;
        };
        let Some((facet, idx)) = self.selected_entry() else {
            return;
        };
        if facet != from {
            self.ui.status = Some(match from {
                ChangeFacet::Unstaged => "Already staged".to_string(),
                ChangeFacet::Staged => "Not staged".to_string(),
            });
            self.ui.dirty = true;
            return;
        }
        let Some(path) = self.entry(facet, idx).map(|e| e.file.path.clone()) else {
            return;
        };

        let result = match from {
            ChangeFacet::Unstaged => self.provider.stage(&root, &path),
            ChangeFacet::Staged => self.provider.unstage(&root, &path),
        };
        match result {
            Ok(()) => {
                self.refresh_status();
                self.ui.status = Some(match from {
                    ChangeFacet::Unstaged => format!("Staged {}", path),
                    ChangeFacet::Staged => format!("Unstaged {}", path),
                });
            }
            Err(e) => {
                log::warn!("index update failed for {}: {}", path, e);
                self.ui.error = Some(format!("{}: {}", path, e));
            }
        }
        self.ui.dirty = true;
    }

    /// Record the screen areas from the last paint; relayout when they changed.
    pub fn sync_layout(&mut self, area: Rect, sidebar_area: Rect) {
        self.layout.sidebar_area = sidebar_area;
        if self.layout.area != area {
            self.layout.area = area;
            self.layout.stale = true;
        }
        self.relayout_if_stale();
    }

    pub(crate) fn relayout_if_stale(&mut self) {
        if !self.layout.stale {
            return;
        }
        self.layout_document();
        // Offsets of diffs that moved are now wrong.
        self.sticky.clear();
        self.engine.rebroadcast(&self.diffs, &mut self.sticky);
    }

    /// Lay out headings, entries and expanded diffs as rows, update diff
    /// extents and pane widths, and resize the document.
    pub fn layout_document(&mut self) {
        let area = self.layout.area;
        let half = area.width.saturating_sub(1) / 2;
        let client_width = f64::from(half.saturating_sub(GUTTER_WIDTH));

        let mut rows = Vec::new();
        for facet in ChangeFacet::ALL {
            if facet == ChangeFacet::Unstaged {
                rows.push(DocRow::Blank);
            }
            rows.push(DocRow::Heading(facet));

            let list = match self.diffs.list_mut(facet) {
                Some(list) if !list.is_empty() => list,
                _ => {
                    rows.push(DocRow::Empty(facet));
                    continue;
                }
            };

            for (idx, entry) in list.entries_mut().enumerate() {
                rows.push(DocRow::File(facet, idx));
                if !entry.active {
                    continue;
                }
                let Some(view) = entry.diff.as_mut() else {
                    continue;
                };

                let top = rows.len();
                if view.content.rows.is_empty() {
                    rows.push(DocRow::DiffNotice(facet, idx));
                } else {
                    rows.extend((0..view.content.rows.len()).map(|r| DocRow::DiffLine(facet, idx, r)));
                }
                view.extent = Extent::new(top as f64, (rows.len() - top) as f64);
                view.left.resize(view.content.old_width as f64, client_width);
                view.right.resize(view.content.new_width as f64, client_width);
            }
        }

        self.engine
            .document
            .resize(f64::from(area.height), rows.len() as f64);
        self.layout.rows = rows;
        self.layout.stale = false;
    }
}
