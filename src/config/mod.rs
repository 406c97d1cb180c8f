//! Configuration module for focus-motion.
//!
//! Provides the motor configuration, the travel-limit validator, and loading of
//! the whole system configuration from TOML files (with `std` feature).

mod limits;
#[cfg(feature = "std")]
mod loader;
mod motor;
mod system;
pub mod units;
mod validation;

pub use limits::{clamp, is_near_limit, validate, TravelLimits};
pub use motor::{
    MotorConfig, DEFAULT_MAX_STEPS, DEFAULT_SPEED, DEFAULT_STEPS_PER_ROTATION, MAX_SPEED,
    MIN_SPEED, SOFT_LIMIT_WARNING,
};
pub use system::{PersistenceConfig, StatusConfig, SystemConfig};
pub use validation::{validate_config, validate_motor};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Degrees, TravelPercent};
