//! Half-step coil phase sequencing.
//!
//! The ULN2003 drives the four coil leads of a unipolar stepper directly, so each
//! step is a new energization pattern rather than a STEP pulse. Eight patterns
//! alternate between one and two active leads, giving half-step resolution.

use serde::Serialize;

/// Number of entries in the half-step sequence.
pub const PHASE_COUNT: u8 = 8;

/// Direction of motor motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Increasing step count.
    Forward,
    /// Decreasing step count.
    Reverse,
}

impl Direction {
    /// Direction needed to travel from `current` toward `target`.
    ///
    /// Returns `None` when already there.
    #[inline]
    pub fn toward(current: i32, target: i32) -> Option<Self> {
        match target.cmp(&current) {
            core::cmp::Ordering::Greater => Some(Direction::Forward),
            core::cmp::Ordering::Less => Some(Direction::Reverse),
            core::cmp::Ordering::Equal => None,
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Direction::Forward => 1,
            Direction::Reverse => -1,
        }
    }
}

/// Levels of the four coil lines (IN1..IN4), `true` = energized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CoilPattern(pub [bool; 4]);

impl CoilPattern {
    /// All lines de-energized.
    pub const OFF: Self = Self([false; 4]);

    /// Check if every line is de-energized.
    #[inline]
    pub fn is_off(&self) -> bool {
        self.0.iter().all(|line| !line)
    }

    /// Number of energized lines.
    #[inline]
    pub fn active_lines(&self) -> usize {
        self.0.iter().filter(|line| **line).count()
    }

    /// Line levels in IN1..IN4 order.
    #[inline]
    pub fn lines(&self) -> [bool; 4] {
        self.0
    }
}

/// Half-step drive sequence, IN1..IN4.
pub const HALF_STEP_SEQUENCE: [CoilPattern; PHASE_COUNT as usize] = [
    CoilPattern([true, false, false, false]),
    CoilPattern([true, true, false, false]),
    CoilPattern([false, true, false, false]),
    CoilPattern([false, true, true, false]),
    CoilPattern([false, false, true, false]),
    CoilPattern([false, false, true, true]),
    CoilPattern([false, false, false, true]),
    CoilPattern([true, false, false, true]),
];

/// Cyclic index into [`HALF_STEP_SEQUENCE`], always in `0..8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseIndex(u8);

impl PhaseIndex {
    /// Create an index, wrapping values beyond the table.
    #[inline]
    pub const fn new(index: u8) -> Self {
        Self(index % PHASE_COUNT)
    }

    /// Get the raw index.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Index one half-step away in `direction`, wrapping 7→0 and 0→7.
    #[inline]
    pub const fn next(self, direction: Direction) -> Self {
        match direction {
            Direction::Forward => Self((self.0 + 1) % PHASE_COUNT),
            Direction::Reverse => Self((self.0 + PHASE_COUNT - 1) % PHASE_COUNT),
        }
    }

    /// Advance in place by one half-step.
    #[inline]
    pub fn advance(&mut self, direction: Direction) {
        *self = self.next(direction);
    }

    /// Energization pattern for this index.
    #[inline]
    pub fn pattern(self) -> CoilPattern {
        HALF_STEP_SEQUENCE[self.0 as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_period_is_eight() {
        let mut index = PhaseIndex::default();
        for step in 1..=16 {
            index.advance(Direction::Forward);
            assert_eq!(index.value() == 0, step % 8 == 0, "step {}", step);
        }
    }

    #[test]
    fn test_reverse_mirrors_forward() {
        let mut index = PhaseIndex::default();
        index.advance(Direction::Reverse);
        assert_eq!(index.value(), 7);

        for step in 2..=16 {
            index.advance(Direction::Reverse);
            assert_eq!(index.value() == 0, step % 8 == 0, "step {}", step);
        }
    }

    #[test]
    fn test_adjacent_rows_hand_off_smoothly() {
        for i in 0..PHASE_COUNT {
            let here = PhaseIndex::new(i);
            let next = here.next(Direction::Forward);
            let changed = here
                .pattern()
                .lines()
                .iter()
                .zip(next.pattern().lines().iter())
                .filter(|(a, b)| a != b)
                .count();
            assert_eq!(changed, 1, "rows {} -> {}", i, next.value());

            let active = here.pattern().active_lines();
            assert!(active == 1 || active == 2);
        }
    }

    #[test]
    fn test_direction_toward() {
        assert_eq!(Direction::toward(0, 10), Some(Direction::Forward));
        assert_eq!(Direction::toward(10, 0), Some(Direction::Reverse));
        assert_eq!(Direction::toward(5, 5), None);
    }

    #[test]
    fn test_new_wraps() {
        assert_eq!(PhaseIndex::new(9).value(), 1);
        assert!(CoilPattern::OFF.is_off());
    }
}
