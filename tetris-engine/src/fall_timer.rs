use std::time::Duration;

/// Accumulates elapsed time and reports when a gravity step is due.
///
/// Each time the accumulated time reaches `interval` the timer fires once and resets
/// to zero, so at most one step fires per `tick` no matter how large the delta was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallTimer {
    interval: Duration,
    elapsed: Duration,
}

impl FallTimer {
    pub fn new(interval: Duration) -> Self {
        FallTimer {
            interval,
            elapsed: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    /// Add `delta`; returns true if a gravity step is due
    pub fn tick(&mut self, delta: Duration) -> bool {
        self.elapsed = self.elapsed.saturating_add(delta);
        if self.elapsed >= self.interval {
            self.elapsed = Duration::ZERO;
            true
        } else {
            false
        }
    }
}
