//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{MotorConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks:
/// - Travel bound and steps per rotation are positive
/// - Speed bounds are ordered and the default speed lies within them
/// - The soft-limit margin fits inside the travel bound
/// - Scheduling intervals are non-zero
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    validate_motor(&config.motor)?;

    if config.persistence.save_interval_ms == 0 {
        return Err(Error::Config(ConfigError::ZeroInterval("save_interval_ms")));
    }

    if config.status.update_interval_ms == 0 {
        return Err(Error::Config(ConfigError::ZeroInterval("update_interval_ms")));
    }

    Ok(())
}

/// Validate a motor configuration on its own.
pub fn validate_motor(config: &MotorConfig) -> Result<()> {
    if config.max_steps <= 0 {
        return Err(Error::Config(ConfigError::InvalidMaxSteps(config.max_steps)));
    }

    if config.steps_per_rotation <= 0 {
        return Err(Error::Config(ConfigError::InvalidStepsPerRotation(
            config.steps_per_rotation,
        )));
    }

    if config.min_speed == 0 || config.min_speed > config.max_speed {
        return Err(Error::Config(ConfigError::InvalidSpeedRange {
            min: config.min_speed,
            max: config.max_speed,
        }));
    }

    if config.default_speed < config.min_speed || config.default_speed > config.max_speed {
        return Err(Error::Config(ConfigError::DefaultSpeedOutOfRange {
            speed: config.default_speed,
            min: config.min_speed,
            max: config.max_speed,
        }));
    }

    if config.soft_limit_warning < 0 || config.soft_limit_warning >= config.max_steps {
        return Err(Error::Config(ConfigError::InvalidSoftLimit {
            margin: config.soft_limit_warning,
            max_steps: config.max_steps,
        }));
    }

    Ok(())
}
