//! Synchronized scrolling for side-by-side diffs.
//!
//! Wheel gestures are claimed by the [`ScrollRouter`] and queued. At the
//! next frame boundary [`ScrollEngine::run_frame`] replays them in order:
//! horizontal gestures move the twin panes of the diff under the cursor
//! together, vertical gestures scroll the [`Document`] and tell every
//! visible diff the new offset through a [`LegacyRenderer`].
//!
//! Nothing here knows about terminals; the UI supplies a [`HitTester`]
//! (usually a [`Scene`]) and a renderer.

mod geometry;
mod hit_test;
mod horizontal;
mod registry;
mod router;
mod vertical;
mod view;
mod visibility;

pub use geometry::*;
pub use hit_test::*;
pub use horizontal::*;
pub use registry::*;
pub use router::*;
pub use vertical::*;
pub use view::*;
pub use visibility::*;

use crate::metrics::FrameTimer;

/// What a frame did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Diffs moved by horizontal gestures, one entry per hit.
    pub horizontal: Vec<DiffViewId>,
    /// Vertical gestures processed.
    pub vertical: usize,
    /// Renderer notifications sent across all vertical gestures.
    pub notified: usize,
}

impl FrameReport {
    /// Whether anything moved.
    pub fn is_empty(&self) -> bool {
        self.horizontal.is_empty() && self.vertical == 0
    }
}

/// Document scroll state plus the queue of gestures awaiting a frame.
#[derive(Debug, Default)]
pub struct ScrollEngine {
    /// Vertical scroll state.
    pub document: Document,
    router: ScrollRouter,
}

impl ScrollEngine {
    /// Create an engine over an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a wheel event and queue it for the next frame.
    pub fn route(&mut self, event: &mut WheelEvent) {
        self.router.route(event);
    }

    /// Whether gestures are waiting.
    pub fn has_pending(&self) -> bool {
        self.router.pending_len() > 0
    }

    /// Run every queued gesture in arrival order.
    ///
    /// Each gesture reads the registry afresh, so a gesture sees the
    /// effect of the ones before it.
    pub fn run_frame(
        &mut self,
        registry: &mut DiffRegistry,
        hit: &dyn HitTester,
        renderer: &mut dyn LegacyRenderer,
    ) -> FrameReport {
        let mut report = FrameReport::default();
        if !self.has_pending() {
            return report;
        }
        let mut timer = FrameTimer::start("scroll_frame");

        let Self { document, router } = self;
        let pending: Vec<ScrollAction> = router.take_pending().collect();
        timer.record(pending.len());
        for action in pending {
            match action {
                ScrollAction::Horizontal {
                    cursor_x,
                    cursor_y,
                    delta_x,
                } => {
                    if let Some(id) = sync_horizontal(registry, hit, cursor_x, cursor_y, delta_x) {
                        report.horizontal.push(id);
                    }
                }
                ScrollAction::Vertical { delta_y } => {
                    report.vertical += 1;
                    report.notified += sync_vertical(document, registry, renderer, delta_y);
                }
            }
        }
        report
    }

    /// Re-send the current offset to visible diffs without moving.
    pub fn rebroadcast(
        &mut self,
        registry: &DiffRegistry,
        renderer: &mut dyn LegacyRenderer,
    ) -> usize {
        sync_vertical(&mut self.document, registry, renderer, 0.0)
    }
}
