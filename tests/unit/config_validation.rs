//! Unit tests for configuration validation.

use focus_motion::config::{parse_config, validate_config, SystemConfig};
use focus_motion::error::{ConfigError, Error};

/// Test validation of the default configuration.
#[test]
fn test_valid_config_passes_validation() {
    assert!(validate_config(&SystemConfig::default()).is_ok());
}

/// Test validation fails for a soft-limit margin wider than the travel.
#[test]
fn test_margin_wider_than_travel() {
    let result = parse_config(
        r#"
[motor]
max_steps = 400
soft_limit_warning = 400
"#,
    );

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidSoftLimit {
            margin: 400,
            max_steps: 400
        }))
    ));
}

/// Test validation fails for a negative soft-limit margin.
#[test]
fn test_negative_margin() {
    let result = parse_config("[motor]\nsoft_limit_warning = -1\n");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidSoftLimit { .. }))
    ));
}

/// Test validation fails for non-positive steps per rotation.
#[test]
fn test_zero_steps_per_rotation() {
    let result = parse_config("[motor]\nsteps_per_rotation = 0\n");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidStepsPerRotation(0)))
    ));
}

/// Test validation fails for a default speed outside the bounds.
#[test]
fn test_default_speed_above_max() {
    let result = parse_config("[motor]\ndefault_speed = 700\n");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::DefaultSpeedOutOfRange {
            speed: 700,
            min: 50,
            max: 600
        }))
    ));
}

/// Test validation fails for a zero status interval.
#[test]
fn test_zero_status_interval() {
    let result = parse_config("[status]\nupdate_interval_ms = 0\n");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::ZeroInterval("update_interval_ms")))
    ));
}
