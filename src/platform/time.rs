//! Frame clocks

use crate::consts::FRAME_INTERVAL_MS;

/// Source of frame timestamps (vsync callback, timer, fixed ticker)
pub trait FrameClock {
    /// Timestamp (ms) of the next frame
    fn next_frame(&mut self) -> u64;
}

/// Headless clock yielding `start + n * interval`
#[derive(Debug, Clone)]
pub struct FixedTicker {
    next: u64,
    interval: u64,
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new(0, FRAME_INTERVAL_MS)
    }
}

impl FixedTicker {
    /// A zero interval is bumped to 1ms so time always advances
    pub fn new(start: u64, interval: u64) -> Self {
        Self {
            next: start,
            interval: interval.max(1),
        }
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }
}

impl FrameClock for FixedTicker {
    fn next_frame(&mut self) -> u64 {
        let now = self.next;
        self.next = self.next.saturating_add(self.interval);
        now
    }
}
