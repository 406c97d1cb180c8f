//! Status snapshots for reporting collaborators.

use serde::Serialize;

use crate::config::{Degrees, StatusConfig, TravelPercent};
use crate::motor::{CoilDriver, FocusController, MotorState};

/// Everything a status consumer needs, read in one go.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusSnapshot {
    /// Current position in steps.
    pub current_position: i32,
    /// Target position in steps.
    pub target_position: i32,
    /// Speed in steps/s.
    pub speed: u32,
    /// Controller state.
    pub state: MotorState,
    /// Whether the controller is driving toward a target.
    pub running: bool,
    /// Whether the current position is inside the soft-limit margin.
    pub near_limit_warning: bool,
    /// Travel bound in effect.
    pub max_steps: i32,
    /// Steps per output revolution in effect.
    pub steps_per_rotation: i32,
    /// Position as a fraction of the symmetric travel range.
    pub travel_percent: TravelPercent,
    /// Output shaft angle.
    pub angle_degrees: Degrees,
}

impl StatusSnapshot {
    /// Steps remaining to the target.
    #[inline]
    pub fn remaining_steps(&self) -> i64 {
        i64::from(self.target_position) - i64::from(self.current_position)
    }
}

/// Paces status publishing to `update_interval_ms`.
#[derive(Debug, Clone, Copy)]
pub struct StatusSchedule {
    interval_us: u64,
    last_publish_us: Option<u64>,
}

impl StatusSchedule {
    /// Create a schedule from configuration.
    pub fn new(config: &StatusConfig) -> Self {
        Self {
            interval_us: u64::from(config.update_interval_ms) * 1000,
            last_publish_us: None,
        }
    }

    /// Check whether a snapshot should be published at `now_us`.
    ///
    /// The first call is always due.
    pub fn is_due(&self, now_us: u64) -> bool {
        match self.last_publish_us {
            None => true,
            Some(last) => now_us.saturating_sub(last) >= self.interval_us,
        }
    }

    /// Take a snapshot if one is due.
    pub fn poll<D, const C: usize>(
        &mut self,
        controller: &FocusController<D, C>,
        now_us: u64,
    ) -> Option<StatusSnapshot>
    where
        D: CoilDriver,
    {
        if !self.is_due(now_us) {
            return None;
        }
        self.last_publish_us = Some(now_us);
        Some(controller.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MotorConfig;
    use crate::motor::SimulatedCoils;

    #[test]
    fn test_status_paced_by_interval() {
        let ctrl = FocusController::<_>::new(SimulatedCoils::new(), MotorConfig::default()).unwrap();
        let mut schedule = StatusSchedule::new(&StatusConfig {
            update_interval_ms: 100,
        });

        assert!(schedule.poll(&ctrl, 5).is_some());
        assert!(schedule.poll(&ctrl, 99_999).is_none());
        let status = schedule.poll(&ctrl, 100_005).unwrap();
        assert_eq!(status.current_position, 0);
        assert_eq!(status.remaining_steps(), 0);
    }
}
