//! Controller states and the transition table.

use core::fmt;

use serde::Serialize;

/// Controller state.
///
/// `is_active` is part of the table below, not derived by excluding other states,
/// so adding a state forces a decision about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MotorState {
    /// At rest after the reference frame was (re)defined.
    #[default]
    Idle = 0,
    /// Advancing the phase sequence toward the target.
    Running = 1,
    /// Coils released after reaching the target or an explicit stop.
    Stopped = 2,
    /// Operator halt; target pinned to the current position.
    EmergencyStop = 3,
}

/// Inputs to the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorEvent {
    /// A target different from the current position was accepted.
    TargetAccepted,
    /// A tick found the position short of the target.
    MotionPending,
    /// A tick found the position equal to the target.
    TargetReached,
    /// Explicit stop.
    StopRequested,
    /// Explicit emergency stop.
    EmergencyStopRequested,
    /// Emergency stop acknowledged by the operator.
    EmergencyAcknowledged,
    /// Reference frame redefined.
    Rezeroed,
}

impl MotorState {
    /// Check if the controller is driving the coils toward a target.
    #[inline]
    pub const fn is_active(self) -> bool {
        match self {
            MotorState::Running => true,
            MotorState::Idle | MotorState::Stopped | MotorState::EmergencyStop => false,
        }
    }

    /// Check if this is the emergency stop state.
    #[inline]
    pub const fn is_emergency(self) -> bool {
        matches!(self, MotorState::EmergencyStop)
    }

    /// Stable numeric code.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            MotorState::Idle => "Idle",
            MotorState::Running => "Running",
            MotorState::Stopped => "Stopped",
            MotorState::EmergencyStop => "E-Stop",
        }
    }

    /// Process an event and return the next state.
    pub const fn transition(self, event: MotorEvent) -> Self {
        use MotorEvent::*;
        use MotorState::*;

        match (self, event) {
            (_, Rezeroed) => Idle,
            (_, StopRequested) => Stopped,
            (_, EmergencyStopRequested) => EmergencyStop,

            // A new target is the explicit act that leaves an emergency stop
            (_, TargetAccepted) => Running,

            // Ticks never release an emergency stop
            (EmergencyStop, MotionPending) => EmergencyStop,
            (_, MotionPending) => Running,

            // Completion lands in Stopped, not Idle
            (Running, TargetReached) => Stopped,
            (state, TargetReached) => state,

            (EmergencyStop, EmergencyAcknowledged) => Stopped,
            (state, EmergencyAcknowledged) => state,
        }
    }
}

impl fmt::Display for MotorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_running_is_active() {
        assert!(MotorState::Running.is_active());
        assert!(!MotorState::Idle.is_active());
        assert!(!MotorState::Stopped.is_active());
        assert!(!MotorState::EmergencyStop.is_active());
    }

    #[test]
    fn test_completion_goes_to_stopped() {
        assert_eq!(
            MotorState::Running.transition(MotorEvent::TargetReached),
            MotorState::Stopped
        );
        assert_eq!(
            MotorState::Idle.transition(MotorEvent::TargetReached),
            MotorState::Idle
        );
    }

    #[test]
    fn test_emergency_stop_survives_ticks() {
        let state = MotorState::Running.transition(MotorEvent::EmergencyStopRequested);
        assert_eq!(state, MotorState::EmergencyStop);
        assert_eq!(state.transition(MotorEvent::MotionPending), MotorState::EmergencyStop);
        assert_eq!(state.transition(MotorEvent::TargetReached), MotorState::EmergencyStop);
        assert_eq!(state.transition(MotorEvent::TargetAccepted), MotorState::Running);
        assert_eq!(state.transition(MotorEvent::EmergencyAcknowledged), MotorState::Stopped);
    }

    #[test]
    fn test_rezero_always_idles() {
        for state in [
            MotorState::Idle,
            MotorState::Running,
            MotorState::Stopped,
            MotorState::EmergencyStop,
        ] {
            assert_eq!(state.transition(MotorEvent::Rezeroed), MotorState::Idle);
        }
    }
}
