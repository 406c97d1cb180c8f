//! Motor configuration from TOML.

use serde::Deserialize;

use super::limits::TravelLimits;

/// Default symmetric travel bound in half-steps.
pub const DEFAULT_MAX_STEPS: i32 = 20_000;
/// Half-steps per output revolution of a 28BYJ-48 class geared motor.
pub const DEFAULT_STEPS_PER_ROTATION: i32 = 4096;
/// Default stepping rate (steps/s).
pub const DEFAULT_SPEED: u32 = 100;
/// Slowest permitted stepping rate (steps/s).
pub const MIN_SPEED: u32 = 50;
/// Fastest permitted stepping rate (steps/s).
pub const MAX_SPEED: u32 = 600;
/// Margin inside the travel bound that raises a soft-limit warning.
pub const SOFT_LIMIT_WARNING: i32 = 500;

/// Motor configuration.
///
/// Every field has a default, so an empty `[motor]` table is a valid
/// configuration for the stock focuser.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct MotorConfig {
    /// Symmetric travel bound: positions live in `[-max_steps, max_steps]`.
    pub max_steps: i32,

    /// Steps per full output revolution (angular display only).
    pub steps_per_rotation: i32,

    /// Speed applied at start-up (steps/s).
    pub default_speed: u32,

    /// Lower speed bound (steps/s).
    pub min_speed: u32,

    /// Upper speed bound (steps/s).
    pub max_speed: u32,

    /// Steps of margin before `max_steps` that trigger a warning.
    pub soft_limit_warning: i32,

    /// Hold new targets after an emergency stop until it is acknowledged.
    pub emergency_latch: bool,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            steps_per_rotation: DEFAULT_STEPS_PER_ROTATION,
            default_speed: DEFAULT_SPEED,
            min_speed: MIN_SPEED,
            max_speed: MAX_SPEED,
            soft_limit_warning: SOFT_LIMIT_WARNING,
            emergency_latch: false,
        }
    }
}

impl MotorConfig {
    /// Travel limits derived from this configuration.
    #[inline]
    pub fn limits(&self) -> TravelLimits {
        TravelLimits::new(self.max_steps, self.soft_limit_warning)
    }

    /// Clamp a speed into `[min_speed, max_speed]`.
    #[inline]
    pub fn clamp_speed(&self, speed: u32) -> u32 {
        speed.max(self.min_speed).min(self.max_speed)
    }
}
