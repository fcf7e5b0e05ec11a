//! Document scrolling and the per-diff vertical position broadcast.

use thiserror::Error;

use super::{visible_diffs, DiffRegistry, DiffView};

/// Vertical scroll state of the whole document.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Document {
    scroll_top: f64,
    client_height: f64,
    scroll_height: f64,
}

impl Document {
    /// Create a document of `scroll_height` seen through `client_height`.
    pub fn new(client_height: f64, scroll_height: f64) -> Self {
        Self {
            scroll_top: 0.0,
            client_height,
            scroll_height,
        }
    }

    /// Current offset from the document top.
    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    /// Viewport height.
    pub fn client_height(&self) -> f64 {
        self.client_height
    }

    /// Total content height.
    pub fn scroll_height(&self) -> f64 {
        self.scroll_height
    }

    /// Largest valid offset.
    pub fn max_scroll_top(&self) -> f64 {
        (self.scroll_height - self.client_height).max(0.0)
    }

    /// Update dimensions after layout, re-clamping the offset.
    pub fn resize(&mut self, client_height: f64, scroll_height: f64) {
        self.client_height = client_height;
        self.scroll_height = scroll_height;
        self.scroll_top = self.scroll_top.clamp(0.0, self.max_scroll_top());
    }

    /// Scroll by `delta`, clamped. Returns the new offset.
    pub fn scroll_by(&mut self, delta: f64) -> f64 {
        self.scroll_top = (self.scroll_top + delta).clamp(0.0, self.max_scroll_top());
        self.scroll_top
    }

    /// Jump to an absolute offset, clamped.
    pub fn scroll_to(&mut self, offset: f64) -> f64 {
        self.scroll_top = offset.clamp(0.0, self.max_scroll_top());
        self.scroll_top
    }
}

/// Error raised by a [`LegacyRenderer`] callback.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RenderError {
    /// The diff has no extent yet.
    #[error("diff {0} has not been laid out")]
    NotLaidOut(u64),
    /// Any other renderer-specific failure.
    #[error("{0}")]
    Other(String),
}

/// Receives the absolute document offset for each visible diff.
pub trait LegacyRenderer {
    /// Reposition `view` for the document being scrolled to `scroll_top`.
    fn scroll_y(&mut self, view: &DiffView, scroll_top: f64) -> Result<(), RenderError>;
}

/// Scroll the document by `delta_y` and notify every visible active diff.
///
/// Visibility is computed after the offset moves. A failing callback is
/// logged and does not stop the rest. Returns how many diffs were notified.
pub fn sync_vertical(
    document: &mut Document,
    registry: &DiffRegistry,
    renderer: &mut dyn LegacyRenderer,
    delta_y: f64,
) -> usize {
    let scroll_top = document.scroll_by(delta_y);
    let visible = visible_diffs(
        registry.active_diffs(),
        scroll_top,
        document.client_height(),
    );

    for diff in &visible {
        if let Err(e) = renderer.scroll_y(diff, scroll_top) {
            log::warn!("vertical sync failed for diff {}: {}", diff.id.0, e);
        }
    }
    visible.len()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::core::{ChangeFacet, FileChangeKind, FileEntry, RelPath, StatusLists};
    use crate::scroll::{DiffViewId, ElementId};

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(u64, f64)>,
        fail_on: Option<u64>,
    }

    impl LegacyRenderer for Recorder {
        fn scroll_y(&mut self, view: &DiffView, scroll_top: f64) -> Result<(), RenderError> {
            self.calls.push((view.id.0, scroll_top));
            if self.fail_on == Some(view.id.0) {
                return Err(RenderError::Other("boom".into()));
            }
            Ok(())
        }
    }

    fn entry(path: &str) -> FileEntry {
        FileEntry::new(RelPath::new(path), Some(FileChangeKind::Modified), None)
    }

    /// Three active staged diffs laid out at the given extents.
    fn registry(extents: &[(f64, f64)]) -> DiffRegistry {
        let mut registry = DiffRegistry::new();
        registry.select_repository(PathBuf::from("/repo"));
        registry.mount(StatusLists {
            index: extents.iter().enumerate().map(|(i, _)| entry(&format!("f{i}"))).collect(),
            working: Vec::new(),
        });
        let list = registry.list_mut(ChangeFacet::Staged).unwrap();
        for (i, &(top, height)) in extents.iter().enumerate() {
            let id = i as u64 + 1;
            list.entry_mut(i)
                .unwrap()
                .activate(DiffView::new(DiffViewId(id), ElementId(id)).with_extent(top, height));
        }
        registry
    }

    #[test]
    fn only_visible_diff_is_notified_with_absolute_offset() {
        let registry = registry(&[(0.0, 100.0), (500.0, 400.0), (2000.0, 100.0)]);
        let mut document = Document::new(200.0, 3000.0);
        document.scroll_to(500.0);
        let mut recorder = Recorder::default();

        let notified = sync_vertical(&mut document, &registry, &mut recorder, 150.0);

        assert_eq!(notified, 1);
        assert_eq!(recorder.calls, vec![(2, 650.0)]);
    }

    #[test]
    fn visibility_uses_updated_offset() {
        let registry = registry(&[(0.0, 50.0), (400.0, 50.0)]);
        let mut document = Document::new(100.0, 1000.0);
        let mut recorder = Recorder::default();

        sync_vertical(&mut document, &registry, &mut recorder, 350.0);
        assert_eq!(recorder.calls, vec![(2, 350.0)]);
    }

    #[test]
    fn offset_is_clamped() {
        let registry = registry(&[(0.0, 50.0)]);
        let mut document = Document::new(100.0, 300.0);
        let mut recorder = Recorder::default();

        sync_vertical(&mut document, &registry, &mut recorder, -40.0);
        assert_eq!(document.scroll_top(), 0.0);
        sync_vertical(&mut document, &registry, &mut recorder, 10_000.0);
        assert_eq!(document.scroll_top(), 200.0);
    }

    #[test]
    fn failing_callback_does_not_stop_broadcast() {
        let registry = registry(&[(0.0, 100.0), (50.0, 100.0), (80.0, 100.0)]);
        let mut document = Document::new(200.0, 1000.0);
        let mut recorder = Recorder {
            fail_on: Some(2),
            ..Default::default()
        };

        let notified = sync_vertical(&mut document, &registry, &mut recorder, 0.0);
        assert_eq!(notified, 3);
        let ids: Vec<_> = recorder.calls.iter().map(|c| c.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn no_repository_notifies_nobody() {
        let mut document = Document::new(100.0, 1000.0);
        let mut recorder = Recorder::default();
        let notified = sync_vertical(&mut document, &DiffRegistry::new(), &mut recorder, 10.0);
        assert_eq!(notified, 0);
        assert!(recorder.calls.is_empty());
    }

    #[test]
    fn resize_reclamps() {
        let mut document = Document::new(100.0, 1000.0);
        document.scroll_to(900.0);
        document.resize(100.0, 400.0);
        assert_eq!(document.scroll_top(), 300.0);
    }
}
