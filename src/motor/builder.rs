//! Builder pattern for FocusController.

use crate::config::{validate_motor, MotorConfig, SystemConfig};
use crate::error::{Error, MotorError, Result};
use crate::history::EVENT_LOG_CAPACITY;

use super::coils::CoilDriver;
use super::controller::FocusController;

/// Builder for creating FocusController instances.
pub struct FocusControllerBuilder<D>
where
    D: CoilDriver,
{
    coils: Option<D>,
    config: MotorConfig,
    initial_position: Option<i32>,
    speed: Option<u32>,
}

impl<D> Default for FocusControllerBuilder<D>
where
    D: CoilDriver,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<D> FocusControllerBuilder<D>
where
    D: CoilDriver,
{
    /// Create a new builder with the default motor configuration.
    pub fn new() -> Self {
        Self {
            coils: None,
            config: MotorConfig::default(),
            initial_position: None,
            speed: None,
        }
    }

    /// Set the coil driver.
    pub fn coils(mut self, coils: D) -> Self {
        self.coils = Some(coils);
        self
    }

    /// Configure from a MotorConfig.
    pub fn from_motor_config(mut self, config: &MotorConfig) -> Self {
        self.config = config.clone();
        self
    }

    /// Configure from the `[motor]` table of a SystemConfig.
    pub fn from_config(self, config: &SystemConfig) -> Self {
        self.from_motor_config(&config.motor)
    }

    /// Set the travel bound in steps.
    pub fn max_steps(mut self, max_steps: i32) -> Self {
        self.config.max_steps = max_steps;
        self
    }

    /// Set steps per output revolution.
    pub fn steps_per_rotation(mut self, steps: i32) -> Self {
        self.config.steps_per_rotation = steps;
        self
    }

    /// Set the soft-limit warning margin in steps.
    pub fn soft_limit_warning(mut self, margin: i32) -> Self {
        self.config.soft_limit_warning = margin;
        self
    }

    /// Require an acknowledgement before leaving an emergency stop.
    pub fn emergency_latch(mut self, latch: bool) -> Self {
        self.config.emergency_latch = latch;
        self
    }

    /// Start at a restored position instead of the origin.
    pub fn initial_position(mut self, position: i32) -> Self {
        self.initial_position = Some(position);
        self
    }

    /// Start at a speed other than the configured default.
    pub fn speed(mut self, speed: u32) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Build a controller with the default event log capacity.
    ///
    /// # Errors
    ///
    /// Returns an error if no coil driver was given, the configuration is invalid,
    /// or the coils could not be released.
    pub fn build(self) -> Result<FocusController<D, EVENT_LOG_CAPACITY>> {
        self.build_with_capacity()
    }

    /// Build a controller with an event log of `C` entries.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build).
    pub fn build_with_capacity<const C: usize>(self) -> Result<FocusController<D, C>> {
        let coils = self
            .coils
            .ok_or(Error::Motor(MotorError::NotInitialized))?;

        validate_motor(&self.config)?;

        let mut controller = FocusController::new(coils, self.config)?;

        if let Some(position) = self.initial_position {
            controller.set_current_position(position);
        }
        if let Some(speed) = self.speed {
            controller.set_speed(speed);
        }

        Ok(controller)
    }
}

impl<D> FocusController<D, EVENT_LOG_CAPACITY>
where
    D: CoilDriver,
{
    /// Create a builder for a controller.
    pub fn builder() -> FocusControllerBuilder<D> {
        FocusControllerBuilder::new()
    }
}
