//! Travel limits and the safety validator.
//!
//! Hard limits clamp, soft limits only warn. Nothing here rejects a position:
//! callers that want rejection check [`validate`] first and act on the code.

use crate::error::ErrorCode;

use super::motor::MotorConfig;

/// Symmetric travel bound with a warning margin, in steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TravelLimits {
    /// Hard bound: positions live in `[-max_steps, max_steps]`.
    pub max_steps: i32,
    /// Margin inside `max_steps` that raises a warning.
    pub soft_limit_warning: i32,
}

impl TravelLimits {
    /// Create travel limits.
    pub const fn new(max_steps: i32, soft_limit_warning: i32) -> Self {
        Self {
            max_steps,
            soft_limit_warning,
        }
    }

    /// Distance from the origin above which a position counts as near the limit.
    ///
    /// Negative when the margin is wider than the travel bound, in which case
    /// every position warns.
    #[inline]
    fn warning_threshold(&self) -> i64 {
        i64::from(self.max_steps) - i64::from(self.soft_limit_warning)
    }

    /// Classify a candidate position.
    pub fn validate(&self, position: i32) -> ErrorCode {
        let distance = i64::from(position).abs();
        if distance > i64::from(self.max_steps) {
            ErrorCode::HardLimitExceeded
        } else if distance > self.warning_threshold() {
            ErrorCode::SoftLimitWarning
        } else {
            ErrorCode::None
        }
    }

    /// Clamp a position into `[-max_steps, max_steps]`.
    #[inline]
    pub fn clamp(&self, position: i32) -> i32 {
        let bound = self.max_steps.max(0);
        position.clamp(-bound, bound)
    }

    /// Check if a position lies inside the warning margin (or beyond).
    #[inline]
    pub fn is_near_limit(&self, position: i32) -> bool {
        i64::from(position).abs() > self.warning_threshold()
    }

    /// Check if a position is within the hard bound.
    #[inline]
    pub fn contains(&self, position: i32) -> bool {
        i64::from(position).abs() <= i64::from(self.max_steps)
    }
}

/// Classify `position` against the configured limits.
///
/// Returns `HardLimitExceeded` beyond `max_steps`, `SoftLimitWarning` inside the
/// warning margin, `None` otherwise.
#[inline]
pub fn validate(position: i32, config: &MotorConfig) -> ErrorCode {
    config.limits().validate(position)
}

/// Clamp `position` into `[-max_steps, max_steps]`.
#[inline]
pub fn clamp(position: i32, config: &MotorConfig) -> i32 {
    config.limits().clamp(position)
}

/// Check if `current_position` is inside the warning margin.
#[inline]
pub fn is_near_limit(current_position: i32, config: &MotorConfig) -> bool {
    config.limits().is_near_limit(current_position)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn focuser() -> TravelLimits {
        TravelLimits::new(20_000, 500)
    }

    #[test]
    fn test_validate_zones() {
        let limits = focuser();

        assert_eq!(limits.validate(19_600), ErrorCode::SoftLimitWarning);
        assert_eq!(limits.validate(19_400), ErrorCode::None);
        assert_eq!(limits.validate(20_500), ErrorCode::HardLimitExceeded);
        assert_eq!(limits.validate(-20_001), ErrorCode::HardLimitExceeded);
        assert_eq!(limits.validate(-19_501), ErrorCode::SoftLimitWarning);
    }

    #[test]
    fn test_zone_edges() {
        let limits = focuser();

        // Margin boundary belongs to the safe zone, the hard bound to the warning zone.
        assert_eq!(limits.validate(19_500), ErrorCode::None);
        assert_eq!(limits.validate(19_501), ErrorCode::SoftLimitWarning);
        assert_eq!(limits.validate(20_000), ErrorCode::SoftLimitWarning);
        assert_eq!(limits.validate(20_001), ErrorCode::HardLimitExceeded);
    }

    #[test]
    fn test_clamp() {
        let limits = focuser();

        assert_eq!(limits.clamp(25_000), 20_000);
        assert_eq!(limits.clamp(-25_000), -20_000);
        assert_eq!(limits.clamp(1234), 1234);
        assert_eq!(limits.clamp(i32::MIN), -20_000);
    }

    #[test]
    fn test_extreme_positions_do_not_overflow() {
        let limits = focuser();

        assert_eq!(limits.validate(i32::MIN), ErrorCode::HardLimitExceeded);
        assert!(limits.is_near_limit(i32::MAX));
    }

    #[test]
    fn test_margin_wider_than_travel_always_warns() {
        let limits = TravelLimits::new(100, 500);

        assert!(limits.is_near_limit(0));
        assert_eq!(limits.validate(0), ErrorCode::SoftLimitWarning);
    }

    #[test]
    fn test_free_functions_follow_config() {
        let config = MotorConfig::default();

        assert_eq!(validate(19_600, &config), ErrorCode::SoftLimitWarning);
        assert_eq!(clamp(30_000, &config), 20_000);
        assert!(!is_near_limit(0, &config));
    }
}
