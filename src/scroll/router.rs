//! Wheel gesture classification and deferral to the next frame.

use std::collections::VecDeque;

/// A wheel gesture over the document.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelEvent {
    /// Horizontal delta.
    pub delta_x: f64,
    /// Vertical delta.
    pub delta_y: f64,
    /// Pointer x in viewport coordinates.
    pub client_x: f64,
    /// Pointer y in viewport coordinates.
    pub client_y: f64,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl WheelEvent {
    /// Create an event at a pointer position.
    pub fn new(delta_x: f64, delta_y: f64, client_x: f64, client_y: f64) -> Self {
        Self {
            delta_x,
            delta_y,
            client_x,
            client_y,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Suppress the host's own scrolling for this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Keep the event from reaching other handlers.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Whether [`WheelEvent::prevent_default`] was called.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Whether [`WheelEvent::stop_propagation`] was called.
    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// A classified gesture awaiting the next frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollAction {
    /// Horizontal scroll of the diff under the cursor.
    Horizontal {
        /// Pointer x.
        cursor_x: f64,
        /// Pointer y.
        cursor_y: f64,
        /// Horizontal delta.
        delta_x: f64,
    },
    /// Vertical scroll of the document.
    Vertical {
        /// Vertical delta.
        delta_y: f64,
    },
}

impl ScrollAction {
    /// Dominant-axis classification. Ties go vertical.
    pub fn classify(event: &WheelEvent) -> Self {
        if event.delta_x.abs() > event.delta_y.abs() {
            Self::Horizontal {
                cursor_x: event.client_x,
                cursor_y: event.client_y,
                delta_x: event.delta_x,
            }
        } else {
            Self::Vertical {
                delta_y: event.delta_y,
            }
        }
    }
}

/// Claims wheel events and queues them for the next frame.
#[derive(Debug, Default)]
pub struct ScrollRouter {
    pending: VecDeque<ScrollAction>,
}

impl ScrollRouter {
    /// Create an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `event` and queue its action.
    pub fn route(&mut self, event: &mut WheelEvent) {
        event.prevent_default();
        event.stop_propagation();

        let action = ScrollAction::classify(event);
        log::trace!("queued {:?}", action);
        self.pending.push_back(action);
    }

    /// Number of actions waiting for a frame.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Drain queued actions in arrival order.
    pub fn take_pending(&mut self) -> impl Iterator<Item = ScrollAction> + '_ {
        self.pending.drain(..)
    }
}
