//! Step cadence - when the next half-step is due.

/// Microseconds per second.
const MICROS_PER_SEC: u64 = 1_000_000;

/// Inter-step interval in microseconds for a speed in steps/second.
///
/// A zero speed is treated as one step per second.
#[inline]
pub fn step_interval_us(speed: u32) -> u64 {
    MICROS_PER_SEC / u64::from(speed.max(1))
}

/// Tracks the time of the last issued step against a monotonic microsecond clock.
///
/// There is no catch-up: however late a poll arrives, at most one step is due.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepCadence {
    /// Timestamp of the last issued step.
    last_step_us: u64,
}

impl StepCadence {
    /// Create a cadence whose last step happened at `last_step_us`.
    #[inline]
    pub const fn new(last_step_us: u64) -> Self {
        Self { last_step_us }
    }

    /// Timestamp of the last issued step.
    #[inline]
    pub fn last_step_us(&self) -> u64 {
        self.last_step_us
    }

    /// Time elapsed since the last step. A clock reading earlier than the last
    /// step counts as no time elapsed.
    #[inline]
    pub fn elapsed_us(&self, now_us: u64) -> u64 {
        now_us.saturating_sub(self.last_step_us)
    }

    /// Check if a step is due at `now_us` for the given speed.
    #[inline]
    pub fn is_due(&self, now_us: u64, speed: u32) -> bool {
        self.elapsed_us(now_us) >= step_interval_us(speed)
    }

    /// Record that a step was issued at `now_us`.
    #[inline]
    pub fn mark(&mut self, now_us: u64) {
        self.last_step_us = now_us;
    }
}
