//! Coil drivers - the actuation boundary.
//!
//! The controller only ever hands a [`CoilPattern`] to a [`CoilDriver`]; it never
//! sees pin numbers.

use embedded_hal::digital::{OutputPin, PinState};

use crate::error::{MotorError, Result};
use crate::motion::CoilPattern;

/// Four independently settable coil lines.
pub trait CoilDriver {
    /// Drive the four lines to `pattern`.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::CoilError` if any line could not be written.
    fn apply(&mut self, pattern: CoilPattern) -> Result<()>;

    /// Release all four lines.
    fn de_energize(&mut self) -> Result<()> {
        self.apply(CoilPattern::OFF)
    }
}

impl<T: CoilDriver + ?Sized> CoilDriver for &mut T {
    fn apply(&mut self, pattern: CoilPattern) -> Result<()> {
        (**self).apply(pattern)
    }
}

/// ULN2003 Darlington array driving IN1..IN4 from embedded-hal output pins.
pub struct Uln2003Driver<IN1, IN2, IN3, IN4>
where
    IN1: OutputPin,
    IN2: OutputPin,
    IN3: OutputPin,
    IN4: OutputPin,
{
    in1: IN1,
    in2: IN2,
    in3: IN3,
    in4: IN4,
}

impl<IN1, IN2, IN3, IN4> Uln2003Driver<IN1, IN2, IN3, IN4>
where
    IN1: OutputPin,
    IN2: OutputPin,
    IN3: OutputPin,
    IN4: OutputPin,
{
    /// Wrap the four input pins of the driver board.
    pub fn new(in1: IN1, in2: IN2, in3: IN3, in4: IN4) -> Self {
        Self { in1, in2, in3, in4 }
    }

    /// Give the pins back.
    pub fn release(self) -> (IN1, IN2, IN3, IN4) {
        (self.in1, self.in2, self.in3, self.in4)
    }
}

impl<IN1, IN2, IN3, IN4> CoilDriver for Uln2003Driver<IN1, IN2, IN3, IN4>
where
    IN1: OutputPin,
    IN2: OutputPin,
    IN3: OutputPin,
    IN4: OutputPin,
{
    fn apply(&mut self, pattern: CoilPattern) -> Result<()> {
        let [a, b, c, d] = pattern.lines();
        self.in1
            .set_state(PinState::from(a))
            .map_err(|_| MotorError::CoilError)?;
        self.in2
            .set_state(PinState::from(b))
            .map_err(|_| MotorError::CoilError)?;
        self.in3
            .set_state(PinState::from(c))
            .map_err(|_| MotorError::CoilError)?;
        self.in4
            .set_state(PinState::from(d))
            .map_err(|_| MotorError::CoilError)?;
        Ok(())
    }
}

/// Coil driver for hosts without GPIO.
///
/// Remembers the last pattern and how many times lines were written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulatedCoils {
    pattern: CoilPattern,
    writes: u32,
}

impl SimulatedCoils {
    /// Create a simulated driver with all lines off.
    pub const fn new() -> Self {
        Self {
            pattern: CoilPattern::OFF,
            writes: 0,
        }
    }

    /// Last applied pattern.
    #[inline]
    pub fn pattern(&self) -> CoilPattern {
        self.pattern
    }

    /// Number of `apply` calls so far.
    #[inline]
    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl CoilDriver for SimulatedCoils {
    fn apply(&mut self, pattern: CoilPattern) -> Result<()> {
        self.pattern = pattern;
        self.writes = self.writes.wrapping_add(1);
        Ok(())
    }
}
