//! Optional frame timings, enabled via STAGEDIFF_METRICS=1.
//!
//! A [`FrameTimer`] wraps one unit of per-frame work (a scroll frame, a
//! status refresh, a paint) and logs its duration and item count when it
//! drops. Work that overruns [`FRAME_BUDGET`] logs at warn level.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use log::Level;

static METRICS_ENABLED: AtomicBool = AtomicBool::new(false);

/// Time one frame may take before its work is reported as slow.
pub const FRAME_BUDGET: Duration = Duration::from_millis(16);

/// Initialize metrics from environment. Call once at startup.
pub fn init() {
    let enabled = std::env::var("STAGEDIFF_METRICS")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    set_enabled(enabled);
}

/// Turn collection on or off.
pub fn set_enabled(enabled: bool) {
    METRICS_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Check if metrics collection is enabled.
#[inline]
pub fn enabled() -> bool {
    METRICS_ENABLED.load(Ordering::Relaxed)
}

/// Times a unit of frame work and reports it on drop.
#[derive(Debug)]
pub struct FrameTimer {
    label: &'static str,
    start: Option<Instant>,
    items: usize,
}

impl FrameTimer {
    /// Start timing. Inert when metrics are disabled.
    #[inline]
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: enabled().then(Instant::now),
            items: 0,
        }
    }

    /// Count items handled during this frame (gestures, entries, rows).
    #[inline]
    pub fn record(&mut self, items: usize) {
        self.items += items;
    }

    /// Whether this timer will report.
    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }
}

impl Drop for FrameTimer {
    fn drop(&mut self) {
        if let Some(start) = self.start {
            let (level, line) = summarize(self.label, start.elapsed(), self.items);
            log::log!(target: "stagediff::metrics", level, "{}", line);
        }
    }
}

fn summarize(label: &str, elapsed: Duration, items: usize) -> (Level, String) {
    let level = if elapsed > FRAME_BUDGET {
        Level::Warn
    } else {
        Level::Debug
    };
    (level, format!("{}: {:?} ({} items)", label, elapsed, items))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_only_active_when_enabled() {
        set_enabled(false);
        assert!(!FrameTimer::start("off").is_active());
        set_enabled(true);
        let mut timer = FrameTimer::start("on");
        assert!(timer.is_active());
        timer.record(2);
        timer.record(3);
        assert_eq!(timer.items, 5);
        set_enabled(false);
    }

    #[test]
    fn overrunning_the_frame_budget_warns() {
        let (level, line) = summarize("scroll_frame", Duration::from_millis(40), 3);
        assert_eq!(level, Level::Warn);
        assert!(line.starts_with("scroll_frame: "));
        assert!(line.ends_with("(3 items)"));

        let (level, _) = summarize("scroll_frame", Duration::from_millis(2), 3);
        assert_eq!(level, Level::Debug);
    }
}
