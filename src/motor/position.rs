//! Position tracking for the focuser.
//!
//! Open-loop: the count is what was commanded, not what the shaft did.

use crate::config::units::{Degrees, TravelPercent};
use crate::motion::Direction;

/// Motor position tracker in half-steps from the origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    steps: i32,
}

impl Position {
    /// Create a tracker at the origin.
    #[inline]
    pub const fn new() -> Self {
        Self { steps: 0 }
    }

    /// Create a tracker at a specific position.
    #[inline]
    pub const fn at(steps: i32) -> Self {
        Self { steps }
    }

    /// Get current position in steps.
    #[inline]
    pub const fn steps(&self) -> i32 {
        self.steps
    }

    /// Set position in steps.
    #[inline]
    pub fn set_steps(&mut self, steps: i32) {
        self.steps = steps;
    }

    /// Move one step in `direction`.
    #[inline]
    pub fn step(&mut self, direction: Direction) {
        self.steps = self.steps.saturating_add(direction.sign());
    }

    /// Signed distance to `target`.
    #[inline]
    pub fn steps_to(&self, target: i32) -> i64 {
        i64::from(target) - i64::from(self.steps)
    }

    /// Output shaft angle.
    #[inline]
    pub fn degrees(&self, steps_per_rotation: i32) -> Degrees {
        Degrees::from_steps(self.steps, steps_per_rotation)
    }

    /// Fraction of the symmetric travel range.
    #[inline]
    pub fn travel_percent(&self, max_steps: i32) -> TravelPercent {
        TravelPercent::from_steps(self.steps, max_steps)
    }
}
