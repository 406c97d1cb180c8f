//! Unit tests for TOML configuration parsing.

use std::io::Write;

use focus_motion::config::{load_config, parse_config, SystemConfig};
use focus_motion::error::{ConfigError, Error};

/// Test parsing a complete focuser configuration from TOML.
#[test]
fn test_parse_focuser_config() {
    let toml_str = r#"
[motor]
max_steps = 12000
steps_per_rotation = 2048
default_speed = 200
min_speed = 60
max_speed = 400
soft_limit_warning = 300
emergency_latch = true

[persistence]
save_interval_ms = 2000

[status]
update_interval_ms = 250
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.motor.max_steps, 12000);
    assert_eq!(config.motor.steps_per_rotation, 2048);
    assert_eq!(config.motor.default_speed, 200);
    assert_eq!(config.motor.min_speed, 60);
    assert_eq!(config.motor.max_speed, 400);
    assert_eq!(config.motor.soft_limit_warning, 300);
    assert!(config.motor.emergency_latch);
    assert_eq!(config.persistence.save_interval_ms, 2000);
    assert_eq!(config.status.update_interval_ms, 250);
}

/// Test that missing keys fall back to the firmware defaults.
#[test]
fn test_missing_keys_use_defaults() {
    let config = parse_config("[motor]\nmax_steps = 8000\n").expect("Failed to parse");

    assert_eq!(config.motor.max_steps, 8000);
    assert_eq!(config.motor.steps_per_rotation, 4096);
    assert_eq!(config.motor.default_speed, 100);
    assert_eq!(config.motor.soft_limit_warning, 500);
    assert!(!config.motor.emergency_latch);
    assert_eq!(config.persistence.save_interval_ms, 5000);
    assert_eq!(config.status.update_interval_ms, 100);
}

/// Test that a wrongly typed value is a parse error, not a panic.
#[test]
fn test_wrong_type_is_parse_error() {
    let result = parse_config("[motor]\nmax_steps = \"far\"\n");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::ParseError(_)))
    ));
}

/// Test loading configuration from a file on disk.
#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join(format!("focus-motion-{}.toml", std::process::id()));
    {
        let mut file = std::fs::File::create(&path).expect("Failed to create file");
        writeln!(file, "[motor]\nmax_speed = 500").expect("Failed to write file");
    }

    let config = load_config(&path).expect("Failed to load config");
    std::fs::remove_file(&path).ok();

    assert_eq!(config.motor.max_speed, 500);
}

/// Test that a missing file is reported as an I/O error.
#[test]
fn test_load_missing_file() {
    let result = load_config("/nonexistent/focuser.toml");
    assert!(matches!(result, Err(Error::Config(ConfigError::IoError(_)))));
}
