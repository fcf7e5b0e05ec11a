//! Diff views and their twin content panes.

use crate::core::SideBySide;

use super::{ElementId, Extent};

/// Stable identity of a diff view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DiffViewId(pub u64);

/// Which of the twin panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Old content.
    Left,
    /// New content.
    Right,
}

/// A horizontally scrollable content area.
///
/// Behaves like a scroll container: `scroll_by` keeps the offset within
/// `[0, scroll_width - client_width]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContentPane {
    scroll_left: f64,
    scroll_width: f64,
    client_width: f64,
}

impl ContentPane {
    /// Create a pane with intrinsic content width `scroll_width`
    /// shown through a window of `client_width`.
    pub fn new(scroll_width: f64, client_width: f64) -> Self {
        Self {
            scroll_left: 0.0,
            scroll_width,
            client_width,
        }
    }

    /// Current horizontal scroll offset.
    pub fn scroll_left(&self) -> f64 {
        self.scroll_left
    }

    /// Intrinsic scrollable width of the content.
    pub fn scroll_width(&self) -> f64 {
        self.scroll_width
    }

    /// Visible width.
    pub fn client_width(&self) -> f64 {
        self.client_width
    }

    /// Largest offset the container allows from its own scrolling.
    pub fn max_scroll_left(&self) -> f64 {
        (self.scroll_width - self.client_width).max(0.0)
    }

    /// Update dimensions after a layout pass.
    pub fn resize(&mut self, scroll_width: f64, client_width: f64) {
        self.scroll_width = scroll_width;
        self.client_width = client_width;
    }

    /// Scroll by `delta`, clamped to the container's range. Returns the new offset.
    pub fn scroll_by(&mut self, delta: f64) -> f64 {
        self.scroll_left = (self.scroll_left + delta).clamp(0.0, self.max_scroll_left());
        self.scroll_left
    }

    /// Take another pane's offset verbatim (never negative).
    pub fn mirror(&mut self, offset: f64) {
        self.scroll_left = offset.max(0.0);
    }
}

/// The rendered pane pair for one file entry.
#[derive(Debug, Clone)]
pub struct DiffView {
    /// Identity.
    pub id: DiffViewId,
    /// Root element used for hit-testing.
    pub root: ElementId,
    /// Old-content pane.
    pub left: ContentPane,
    /// New-content pane.
    pub right: ContentPane,
    /// Vertical extent in document coordinates.
    pub extent: Extent,
    /// Rows displayed in the panes.
    pub content: SideBySide,
}

impl DiffView {
    /// Create an empty view.
    pub fn new(id: DiffViewId, root: ElementId) -> Self {
        Self {
            id,
            root,
            left: ContentPane::default(),
            right: ContentPane::default(),
            extent: Extent::default(),
            content: SideBySide::default(),
        }
    }

    /// Attach content.
    pub fn with_content(mut self, content: SideBySide) -> Self {
        self.content = content;
        self
    }

    /// Set the vertical extent.
    pub fn with_extent(mut self, top: f64, height: f64) -> Self {
        self.extent = Extent::new(top, height);
        self
    }

    /// Set both panes' dimensions.
    pub fn with_panes(mut self, left: ContentPane, right: ContentPane) -> Self {
        self.left = left;
        self.right = right;
        self
    }

    /// Borrow one pane.
    pub fn pane(&self, side: Side) -> &ContentPane {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// The pane whose scrolling is authoritative: the strictly wider one,
    /// the left pane on a tie.
    pub fn master_side(&self) -> Side {
        if self.right.scroll_width > self.left.scroll_width {
            Side::Right
        } else {
            Side::Left
        }
    }

    /// Borrow (master, slave) mutably.
    pub fn master_and_slave(&mut self) -> (&mut ContentPane, &mut ContentPane) {
        match self.master_side() {
            Side::Left => (&mut self.left, &mut self.right),
            Side::Right => (&mut self.right, &mut self.left),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pane_scroll_clamps_to_container() {
        let mut pane = ContentPane::new(500.0, 300.0);
        assert_eq!(pane.scroll_by(-20.0), 0.0);
        assert_eq!(pane.scroll_by(150.0), 150.0);
        assert_eq!(pane.scroll_by(150.0), 200.0);
    }

    #[test]
    fn pane_narrower_than_window_does_not_scroll() {
        let mut pane = ContentPane::new(100.0, 300.0);
        assert_eq!(pane.scroll_by(40.0), 0.0);
    }

    #[test]
    fn mirror_copies_offset() {
        let mut pane = ContentPane::new(100.0, 300.0);
        pane.mirror(250.0);
        assert_eq!(pane.scroll_left(), 250.0);
        pane.mirror(-5.0);
        assert_eq!(pane.scroll_left(), 0.0);
    }

    #[test]
    fn master_is_wider_pane_left_on_tie() {
        let view = DiffView::new(DiffViewId(1), ElementId(1))
            .with_panes(ContentPane::new(500.0, 100.0), ContentPane::new(800.0, 100.0));
        assert_eq!(view.master_side(), Side::Right);

        let tie = DiffView::new(DiffViewId(2), ElementId(2))
            .with_panes(ContentPane::new(500.0, 100.0), ContentPane::new(500.0, 100.0));
        assert_eq!(tie.master_side(), Side::Left);
    }
}
