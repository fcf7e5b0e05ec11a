//! Which diffs intersect the viewport.

use super::{DiffView, Extent};

/// Whether an extent intersects `[scroll_top, scroll_top + viewport_height]`.
///
/// Bounds are inclusive: an extent touching either viewport edge counts.
pub fn is_visible(extent: Extent, scroll_top: f64, viewport_height: f64) -> bool {
    let top = extent.top;
    let bottom = extent.bottom();
    let scroll_bottom = scroll_top + viewport_height;

    let top_inside = top >= scroll_top && top <= scroll_bottom;
    let bottom_inside = bottom >= scroll_top && bottom <= scroll_bottom;
    let spans = top <= scroll_top && bottom >= scroll_bottom;

    top_inside || bottom_inside || spans
}

/// Filter `active` down to the diffs intersecting the viewport, preserving order.
pub fn visible_diffs<'a>(
    active: impl IntoIterator<Item = &'a DiffView>,
    scroll_top: f64,
    viewport_height: f64,
) -> Vec<&'a DiffView> {
    active
        .into_iter()
        .filter(|diff| is_visible(diff.extent, scroll_top, viewport_height))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::{DiffViewId, ElementId};

    fn diff(id: u64, top: f64, height: f64) -> DiffView {
        DiffView::new(DiffViewId(id), ElementId(id)).with_extent(top, height)
    }

    #[test]
    fn diff_spanning_viewport_is_visible() {
        assert!(is_visible(Extent::new(0.0, 10_000.0), 100.0, 100.0));
    }

    #[test]
    fn edges_are_inclusive() {
        // Bottom touching the viewport top.
        assert!(is_visible(Extent::new(0.0, 100.0), 100.0, 50.0));
        // Top touching the viewport bottom.
        assert!(is_visible(Extent::new(150.0, 10.0), 100.0, 50.0));
    }

    #[test]
    fn fully_outside_is_hidden() {
        assert!(!is_visible(Extent::new(0.0, 99.0), 100.0, 50.0));
        assert!(!is_visible(Extent::new(151.0, 10.0), 100.0, 50.0));
    }

    #[test]
    fn partially_visible_either_end() {
        assert!(is_visible(Extent::new(50.0, 80.0), 100.0, 50.0));
        assert!(is_visible(Extent::new(120.0, 500.0), 100.0, 50.0));
    }

    #[test]
    fn order_is_preserved() {
        let diffs = [
            diff(1, 0.0, 50.0),
            diff(2, 400.0, 50.0),
            diff(3, 120.0, 50.0),
            diff(4, 900.0, 50.0),
            diff(5, 60.0, 100.0),
        ];
        let visible: Vec<_> = visible_diffs(&diffs, 100.0, 350.0)
            .iter()
            .map(|d| d.id.0)
            .collect();
        assert_eq!(visible, vec![2, 3, 5]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let diffs: Vec<DiffView> = Vec::new();
        assert!(visible_diffs(&diffs, 0.0, 100.0).is_empty());
    }
}
