//! Fixed-tick scheduler
//!
//! Converts wall-clock time into a whole number of simulation ticks. The
//! session owns exactly one clock; starting it discards any time left over
//! from a previous run so no stale ticks leak into a new game.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_CATCHUP_TICKS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedClock {
    interval: Duration,
    accumulator: Duration,
    running: bool,
}

impl FixedClock {
    /// A stopped clock. Zero intervals are bumped to one microsecond.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_micros(1)),
            accumulator: Duration::ZERO,
            running: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.accumulator = Duration::ZERO;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.accumulator = Duration::ZERO;
        self.running = false;
    }

    /// Feed elapsed time and return how many ticks are due.
    ///
    /// At most `MAX_CATCHUP_TICKS` are returned per call; anything beyond
    /// that is dropped instead of queued.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.running {
            return 0;
        }
        self.accumulator += elapsed;

        let mut due = 0;
        while self.accumulator >= self.interval && due < MAX_CATCHUP_TICKS {
            self.accumulator -= self.interval;
            due += 1;
        }
        if due == MAX_CATCHUP_TICKS && self.accumulator >= self.interval {
            log::debug!("Clock fell behind, dropping {:?}", self.accumulator);
            self.accumulator = Duration::ZERO;
        }
        due
    }
}
