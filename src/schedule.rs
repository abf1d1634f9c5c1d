//! Deterministic timers advanced by the session's single time source.
//!
//! Nothing here reads the wall clock; callers feed elapsed milliseconds in,
//! which keeps every timer replayable from tests.

/// Repeating timer that fires once every `period_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Clock {
    period_ms: u64,
    elapsed_ms: u64,
}

impl Clock {
    /// A fresh clock whose first firing is one full period away.
    /// A zero period is bumped to 1 ms so the clock always makes progress.
    pub fn new(period_ms: u64) -> Self {
        Clock {
            period_ms: period_ms.max(1),
            elapsed_ms: 0,
        }
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Milliseconds left before the next firing. Never zero.
    pub fn until_next(&self) -> u64 {
        self.period_ms - self.elapsed_ms
    }

    /// Add `dt_ms` and return how many times the clock fired.
    pub fn advance(&mut self, dt_ms: u64) -> u64 {
        let total = self.elapsed_ms + dt_ms;
        self.elapsed_ms = total % self.period_ms;
        total / self.period_ms
    }
}

/// One-shot delay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Countdown {
    remaining_ms: u64,
}

impl Countdown {
    pub fn new(delay_ms: u64) -> Self {
        Countdown {
            remaining_ms: delay_ms,
        }
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    /// Consume `dt_ms`; true once the delay has fully elapsed.
    pub fn advance(&mut self, dt_ms: u64) -> bool {
        self.remaining_ms = self.remaining_ms.saturating_sub(dt_ms);
        self.remaining_ms == 0
    }
}
