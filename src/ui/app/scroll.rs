//! Gesture entry points and the frame boundary.

use std::collections::HashMap;

use crate::scroll::{DiffView, DiffViewId, FrameReport, LegacyRenderer, RenderError, WheelEvent};

use super::App;

/// Rows moved per wheel notch or `J`/`K` press.
pub const WHEEL_LINES: f64 = 3.0;

/// Columns moved per horizontal wheel notch or `h`/`l` press.
pub const WHEEL_COLUMNS: f64 = 8.0;

/// Keeps a diff's file header pinned while the diff's top is scrolled off.
///
/// Receives the absolute document offset for each visible diff and
/// remembers how far the viewport top is into that diff.
#[derive(Debug, Default)]
pub struct StickyHeaders {
    offsets: HashMap<DiffViewId, f64>,
}

impl StickyHeaders {
    /// Distance from the diff's top to the viewport top, if known.
    /// Negative while the diff starts below the viewport top.
    pub fn offset(&self, id: DiffViewId) -> Option<f64> {
        self.offsets.get(&id).copied()
    }

    /// Whether the header of `view` should be drawn pinned.
    pub fn is_pinned(&self, view: &DiffView) -> bool {
        self.offset(view.id)
            .is_some_and(|into| into >= 0.0 && into < view.extent.height)
    }

    /// Forget all offsets.
    pub fn clear(&mut self) {
        self.offsets.clear();
    }
}

impl LegacyRenderer for StickyHeaders {
    fn scroll_y(&mut self, view: &DiffView, scroll_top: f64) -> Result<(), RenderError> {
        if view.extent.height <= 0.0 {
            return Err(RenderError::NotLaidOut(view.id.0));
        }
        self.offsets.insert(view.id, scroll_top - view.extent.top);
        Ok(())
    }
}

impl App {
    /// Hand a wheel event to the router. It takes effect at the next frame.
    pub fn on_wheel(&mut self, mut event: WheelEvent) {
        self.engine.route(&mut event);
    }

    /// Keyboard vertical scroll, routed like a wheel gesture.
    pub fn scroll_document(&mut self, rows: f64) {
        let area = self.layout.area;
        self.on_wheel(WheelEvent::new(0.0, rows, f64::from(area.x), f64::from(area.y)));
    }

    /// Keyboard horizontal scroll of the selected diff, routed as a wheel
    /// gesture at the centre of that diff on screen.
    pub fn scroll_selected_horizontally(&mut self, columns: f64) {
        let root = self
            .selected_entry()
            .and_then(|(facet, idx)| self.entry(facet, idx))
            .and_then(|entry| entry.active_diff())
            .map(|diff| diff.root);
        let Some(root) = root else {
            self.ui.status = Some("Expand a file to scroll it".to_string());
            self.ui.dirty = true;
            return;
        };
        let Some(rect) = self.scene.rect_of(root) else {
            log::trace!("selected diff is off screen");
            return;
        };
        let (x, y) = rect.center();
        self.on_wheel(WheelEvent::new(columns, 0.0, x, y));
    }

    /// Frame boundary: relayout if needed, then run every queued gesture.
    pub fn run_frame(&mut self) -> FrameReport {
        self.relayout_if_stale();
        if std::mem::take(&mut self.follow_cursor) {
            self.queue_cursor_scroll();
        }

        let report = self
            .engine
            .run_frame(&mut self.diffs, &self.scene, &mut self.sticky);
        if !report.is_empty() {
            self.ui.dirty = true;
        }
        report
    }

    /// Queue a vertical gesture that brings the cursor row into view.
    fn queue_cursor_scroll(&mut self) {
        let Some((facet, idx)) = self.selected_entry() else {
            return;
        };
        let Some(row) = self.layout.file_row(facet, idx) else {
            return;
        };
        let row = row as f64;
        let top = self.engine.document.scroll_top();
        let height = self.engine.document.client_height();

        let delta = if row < top {
            row - top
        } else if row + 1.0 > top + height {
            row + 1.0 - (top + height)
        } else {
            return;
        };
        self.scroll_document(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::{ElementId, Extent};

    fn view(top: f64, height: f64) -> DiffView {
        let mut view = DiffView::new(DiffViewId(1), ElementId(1));
        view.extent = Extent::new(top, height);
        view
    }

    #[test]
    fn header_pins_only_while_inside_diff() {
        let mut sticky = StickyHeaders::default();
        let diff = view(10.0, 20.0);

        sticky.scroll_y(&diff, 5.0).unwrap();
        assert!(!sticky.is_pinned(&diff));

        sticky.scroll_y(&diff, 10.0).unwrap();
        assert!(sticky.is_pinned(&diff));

        sticky.scroll_y(&diff, 25.0).unwrap();
        assert_eq!(sticky.offset(diff.id), Some(15.0));
        assert!(sticky.is_pinned(&diff));

        sticky.scroll_y(&diff, 30.0).unwrap();
        assert!(!sticky.is_pinned(&diff));
    }

    #[test]
    fn unlaid_out_diff_is_an_error() {
        let mut sticky = StickyHeaders::default();
        let diff = view(0.0, 0.0);
        assert!(matches!(
            sticky.scroll_y(&diff, 0.0),
            Err(RenderError::NotLaidOut(1))
        ));
    }
}
