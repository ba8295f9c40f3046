//! Cooperative scheduling of the two cadences that drive a visualizer: one
//! animation step per display frame and gesture sampling on a fixed timer.
//!
//! Both run on the caller's thread, so the animation step and gesture
//! updates can never interleave. [`Scheduler::cancel`] stops both.

use crate::constants::GESTURE_SAMPLE_INTERVAL_MS;
use std::time::Duration;

// After a long stall only this many overdue samples are replayed.
const MAX_CATCH_UP: u32 = 3;

/// Accumulates elapsed time and reports how many fixed periods have passed.
#[derive(Clone, Debug)]
pub struct FixedInterval {
    period: Duration,
    accumulated: Duration,
}

impl FixedInterval {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            accumulated: Duration::ZERO,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Add `dt` and return the number of periods that are now due.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        self.accumulated += dt;
        let mut due = 0;
        while self.accumulated >= self.period {
            self.accumulated -= self.period;
            due += 1;
        }
        if due > MAX_CATCH_UP {
            log::debug!("[scheduler] dropping {} overdue samples", due - MAX_CATCH_UP);
            due = MAX_CATCH_UP;
        }
        due
    }

    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}

/// Work due for one display frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tick {
    pub step: bool,
    pub gesture_samples: u32,
}

#[derive(Clone, Debug)]
pub struct Scheduler {
    gesture: FixedInterval,
    frames: u64,
    cancelled: bool,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(Duration::from_millis(GESTURE_SAMPLE_INTERVAL_MS))
    }
}

impl Scheduler {
    pub fn new(gesture_period: Duration) -> Self {
        Self {
            gesture: FixedInterval::new(gesture_period),
            frames: 0,
            cancelled: false,
        }
    }

    /// Called once per display refresh with the time since the last call.
    pub fn poll(&mut self, dt: Duration) -> Tick {
        if self.cancelled {
            return Tick::default();
        }
        self.frames += 1;
        Tick {
            step: true,
            gesture_samples: self.gesture.advance(dt),
        }
    }

    /// Stop scheduling frames and gesture samples. Idempotent.
    pub fn cancel(&mut self) {
        if !self.cancelled {
            log::debug!("[scheduler] cancelled after {} frames", self.frames);
        }
        self.cancelled = true;
        self.gesture.reset();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
