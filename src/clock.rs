//! Fixed-timestep accumulator.
//!
//! Frames arrive at whatever rate the display (or terminal timer) manages;
//! the clock turns the time between them into whole simulation ticks and
//! carries the remainder over to the next frame.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationClock {
    last_timestamp: Duration,
    accumulator: Duration,
}

impl SimulationClock {
    /// Anchor the clock at `now` with nothing accumulated
    pub fn new(now: Duration) -> Self {
        Self {
            last_timestamp: now,
            accumulator: Duration::ZERO,
        }
    }

    /// Forget accumulated time and re-anchor at `now`
    pub fn reset(&mut self, now: Duration) {
        self.last_timestamp = now;
        self.accumulator = Duration::ZERO;
    }

    /// Count how many whole `interval`s have elapsed up to `now`.
    ///
    /// While paused the frame only moves the anchor, so the paused stretch is
    /// never replayed as ticks on resume.
    pub fn advance(&mut self, now: Duration, paused: bool, interval: Duration) -> u32 {
        self.accumulate(now, paused);
        let mut ticks = 0;
        while self.consume_tick(interval) {
            ticks += 1;
        }
        ticks
    }

    /// Fold the time since the previous frame into the accumulator.
    ///
    /// Timestamps that go backwards count as zero elapsed time.
    pub fn accumulate(&mut self, now: Duration, paused: bool) {
        let delta = now.saturating_sub(self.last_timestamp);
        self.last_timestamp = now;
        if !paused {
            self.accumulator += delta;
        }
    }

    /// Take one tick worth of time if enough has accumulated
    pub fn consume_tick(&mut self, interval: Duration) -> bool {
        if interval.is_zero() || self.accumulator < interval {
            return false;
        }
        self.accumulator -= interval;
        true
    }

    pub fn accumulator(&self) -> Duration {
        self.accumulator
    }

    pub fn last_timestamp(&self) -> Duration {
        self.last_timestamp
    }
}
