use crate::camera::MouseDelta;

/// Converts absolute cursor positions into per-frame look deltas.
///
/// The first event after creation (or after [`reset`](Self::reset)) only
/// latches the position and reports a zero delta, so the camera does not
/// jump when the cursor first enters the window. Screen y grows downward;
/// the reported `dy` is flipped so positive means "cursor moved up".
#[derive(Debug, Default)]
pub struct MouseTracker {
    last: Option<(f32, f32)>,
}

impl MouseTracker {
    /// New tracker with no latched position.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed an absolute cursor position; returns the delta since the last
    /// position.
    pub fn offset(&mut self, x: f32, y: f32) -> MouseDelta {
        let delta =
            self.last
                .map_or_else(MouseDelta::default, |(last_x, last_y)| {
                    MouseDelta {
                        dx: x - last_x,
                        dy: last_y - y,
                    }
                });
        self.last = Some((x, y));
        delta
    }

    /// Forget the latched position (e.g. after the cursor was re-grabbed),
    /// so the next event does not produce a spurious jump.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_event_reports_zero_delta() {
        let mut tracker = MouseTracker::new();
        assert_eq!(tracker.offset(400.0, 300.0), MouseDelta::default());
    }

    #[test]
    fn subsequent_events_report_inverted_y() {
        let mut tracker = MouseTracker::new();
        let _ = tracker.offset(400.0, 300.0);
        // Cursor moved right and down; dy must come out negative.
        let delta = tracker.offset(410.0, 305.0);
        assert_eq!(delta, MouseDelta { dx: 10.0, dy: -5.0 });
    }

    #[test]
    fn reset_relatches_without_a_jump() {
        let mut tracker = MouseTracker::new();
        let _ = tracker.offset(0.0, 0.0);
        tracker.reset();
        assert_eq!(tracker.offset(500.0, 500.0), MouseDelta::default());
        assert_eq!(
            tracker.offset(501.0, 499.0),
            MouseDelta { dx: 1.0, dy: 1.0 }
        );
    }
}
