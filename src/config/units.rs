//! Unit types for display quantities.
//!
//! Positions are tracked as signed half-step counts; these types only exist at the
//! reporting edge where counts are turned into angles and travel fractions.

use core::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Angular position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Degrees(pub f32);

impl Degrees {
    /// Create a new Degrees value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Angle of a step count given the steps in one output revolution.
    ///
    /// A non-positive `steps_per_rotation` yields zero.
    #[inline]
    pub fn from_steps(steps: i32, steps_per_rotation: i32) -> Self {
        if steps_per_rotation <= 0 {
            return Self(0.0);
        }
        Self(steps as f32 / steps_per_rotation as f32 * 360.0)
    }
}

impl Add for Degrees {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Degrees {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

/// Position within the symmetric travel range, as a percentage.
///
/// `0` is `-max_steps`, `50` is the origin and `100` is `+max_steps`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct TravelPercent(pub f32);

impl TravelPercent {
    /// Compute the travel fraction of `steps` within `[-max_steps, max_steps]`.
    ///
    /// A non-positive `max_steps` reports the centre.
    #[inline]
    pub fn from_steps(steps: i32, max_steps: i32) -> Self {
        if max_steps <= 0 {
            return Self(50.0);
        }
        Self(50.0 + steps as f32 / (2.0 * max_steps as f32) * 100.0)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarter_turn() {
        let d = Degrees::from_steps(1024, 4096);
        assert!((d.value() - 90.0).abs() < 0.001);
    }

    #[test]
    fn test_negative_angle() {
        let d = Degrees::from_steps(-2048, 4096);
        assert!((d.value() + 180.0).abs() < 0.001);
    }

    #[test]
    fn test_travel_percent_bounds() {
        assert!((TravelPercent::from_steps(0, 20000).value() - 50.0).abs() < 0.001);
        assert!((TravelPercent::from_steps(20000, 20000).value() - 100.0).abs() < 0.001);
        assert!(TravelPercent::from_steps(-20000, 20000).value().abs() < 0.001);
        assert!((TravelPercent::from_steps(10, 0).value() - 50.0).abs() < 0.001);
    }
}
