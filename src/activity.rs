//! Outbound activity tracking for the window's LEDs and counters
//!
//! Records when each control last produced a message and how many messages
//! were sent or dropped. Owned by the window, so no synchronisation is needed.

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::trace;

/// How long an activity LED stays lit after a send
pub const DEFAULT_LED_DURATION: Duration = Duration::from_millis(150);

/// The three message-producing controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Slider,
    Play,
    Cue,
}

/// Activity tracker for monitoring message flow
pub struct ActivityTracker {
    last_sent: HashMap<Control, Instant>,
    led_duration: Duration,
    sent: u64,
    dropped: u64,
}

impl ActivityTracker {
    pub fn new(led_duration: Duration) -> Self {
        Self {
            last_sent: HashMap::new(),
            led_duration,
            sent: 0,
            dropped: 0,
        }
    }

    /// Record a delivered message
    pub fn record_sent(&mut self, control: Control) {
        self.record_sent_at(control, Instant::now());
    }

    fn record_sent_at(&mut self, control: Control, at: Instant) {
        self.last_sent.insert(control, at);
        self.sent += 1;
        trace!("Activity: {:?}", control);
    }

    /// Record a message lost to a send error
    pub fn record_dropped(&mut self, control: Control) {
        self.dropped += 1;
        trace!("Dropped: {:?}", control);
    }

    /// True if `control` sent within the LED duration window
    pub fn is_active(&self, control: Control) -> bool {
        self.is_active_at(control, Instant::now())
    }

    fn is_active_at(&self, control: Control, now: Instant) -> bool {
        self.last_sent
            .get(&control)
            .map(|at| now.saturating_duration_since(*at) < self.led_duration)
            .unwrap_or(false)
    }

    pub fn sent(&self) -> u64 {
        self.sent
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl Default for ActivityTracker {
    fn default() -> Self {
        Self::new(DEFAULT_LED_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_tracking() {
        let mut tracker = ActivityTracker::new(Duration::from_millis(100));
        let start = Instant::now();

        tracker.record_sent_at(Control::Play, start);

        // Should be active immediately
        assert!(tracker.is_active_at(Control::Play, start));

        // Other controls untouched
        assert!(!tracker.is_active_at(Control::Cue, start));
        assert!(!tracker.is_active_at(Control::Slider, start));

        // Expired after the LED window
        assert!(!tracker.is_active_at(Control::Play, start + Duration::from_millis(150)));
    }

    #[test]
    fn test_counters() {
        let mut tracker = ActivityTracker::default();

        tracker.record_sent(Control::Slider);
        tracker.record_sent(Control::Slider);
        tracker.record_dropped(Control::Cue);

        assert_eq!(tracker.sent(), 2);
        assert_eq!(tracker.dropped(), 1);
        assert!(tracker.is_active(Control::Slider));
        assert!(!tracker.is_active(Control::Cue));
    }
}
