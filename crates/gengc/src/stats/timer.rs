//! GC Timer - Cycle and Phase Timing
//!
//! Wall-clock durations are reported for diagnostics only; no collector
//! decision depends on them.

use std::time::{Duration, Instant};

/// GcTimer - measures a whole cycle and the phases inside it
#[derive(Debug, Clone)]
pub struct GcTimer {
    start: Instant,
    last_lap: Instant,
}

impl GcTimer {
    /// Create new timer
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_lap: now,
        }
    }

    /// Time since the timer was created
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Get elapsed nanoseconds
    pub fn elapsed_ns(&self) -> u64 {
        duration_ns(self.elapsed())
    }

    /// Nanoseconds since the previous lap (or creation), starting a new lap
    pub fn lap_ns(&mut self) -> u64 {
        let now = Instant::now();
        let lap = now.duration_since(self.last_lap);
        self.last_lap = now;
        duration_ns(lap)
    }
}

impl Default for GcTimer {
    fn default() -> Self {
        Self::new()
    }
}

fn duration_ns(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}
