//! Commands from network and UI collaborators.
//!
//! Commands arrive already parsed; this module only decides what each one does to
//! the controller.

use crate::error::{ErrorCode, Result};

use super::coils::CoilDriver;
use super::controller::FocusController;

/// A single request to the focus controller.
///
/// Deserializes from `{ command = "move_to", position = 500 }` style tables when
/// the `alloc` feature is on (internally tagged enums need buffering).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(
    feature = "alloc",
    derive(serde::Deserialize),
    serde(tag = "command", rename_all = "snake_case")
)]
pub enum Command {
    /// Move to an absolute position.
    MoveTo {
        /// Target position in steps.
        position: i32,
    },
    /// Move by a signed offset from the current position.
    Nudge {
        /// Offset in steps.
        steps: i32,
    },
    /// Change the step rate.
    SetSpeed {
        /// Speed in steps/s.
        speed: u32,
    },
    /// Release the coils, keep the target.
    Stop,
    /// Release the coils and drop the target.
    EmergencyStop,
    /// Declare the current position to be the origin.
    Zero,
    /// Declare the current position to be `position`.
    SetPosition {
        /// New current position in steps.
        position: i32,
    },
    /// Change the travel bound.
    SetMaxSteps {
        /// New bound in steps.
        max_steps: i32,
    },
    /// Change the steps per output revolution.
    SetStepsPerRotation {
        /// Steps per revolution.
        steps: i32,
    },
    /// Leave a latched emergency stop.
    AcknowledgeEmergency,
    /// Drop the event log.
    ClearLog,
}

impl Command {
    /// Absolute target this command would request from `current`, if it moves.
    pub fn target(&self, current: i32) -> Option<i32> {
        match *self {
            Command::MoveTo { position } => Some(position),
            Command::Nudge { steps } => Some(current.saturating_add(steps)),
            _ => None,
        }
    }
}

impl<D, const C: usize> FocusController<D, C>
where
    D: CoilDriver,
{
    /// Classify a command without executing it.
    ///
    /// Lets a UI show the safety verdict before the operator confirms a move.
    pub fn preflight(&self, command: &Command) -> ErrorCode {
        if let Some(target) = command.target(self.current_position()) {
            if self.state().is_emergency() && self.config().emergency_latch {
                return ErrorCode::InvalidPosition;
            }
            return self.validate(target);
        }

        let latched = self.state().is_emergency() && self.config().emergency_latch;

        match *command {
            Command::Zero | Command::SetPosition { .. } if latched => ErrorCode::InvalidPosition,
            Command::SetSpeed { speed } if self.config().clamp_speed(speed) != speed => {
                ErrorCode::InvalidSpeed
            }
            Command::SetPosition { position } => self.validate(position),
            Command::SetMaxSteps { max_steps } if max_steps <= 0 => ErrorCode::InvalidPosition,
            Command::SetStepsPerRotation { steps } if steps <= 0 => ErrorCode::InvalidPosition,
            _ => ErrorCode::None,
        }
    }

    /// Execute a command.
    ///
    /// Returns the same classification as the matching direct call.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::CoilError` if a stop could not release the coils.
    pub fn apply(&mut self, command: Command) -> Result<ErrorCode> {
        debug!("command {}", command.name());

        let code = match command {
            Command::MoveTo { position } => self.set_target_position(position),
            Command::Nudge { steps } => self.nudge(steps),
            Command::SetSpeed { speed } => self.set_speed(speed),
            Command::Stop => {
                self.stop()?;
                ErrorCode::None
            }
            Command::EmergencyStop => {
                self.emergency_stop()?;
                ErrorCode::None
            }
            Command::Zero => self.set_current_position(0),
            Command::SetPosition { position } => self.set_current_position(position),
            Command::SetMaxSteps { max_steps } => {
                let code = self.preflight(&command);
                self.set_max_steps(max_steps);
                code
            }
            Command::SetStepsPerRotation { steps } => {
                let code = self.preflight(&command);
                self.set_steps_per_rotation(steps);
                code
            }
            Command::AcknowledgeEmergency => {
                self.acknowledge_emergency();
                ErrorCode::None
            }
            Command::ClearLog => {
                self.clear_log();
                ErrorCode::None
            }
        };

        Ok(code)
    }
}

impl Command {
    /// Short name for logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Command::MoveTo { .. } => "move_to",
            Command::Nudge { .. } => "nudge",
            Command::SetSpeed { .. } => "set_speed",
            Command::Stop => "stop",
            Command::EmergencyStop => "emergency_stop",
            Command::Zero => "zero",
            Command::SetPosition { .. } => "set_position",
            Command::SetMaxSteps { .. } => "set_max_steps",
            Command::SetStepsPerRotation { .. } => "set_steps_per_rotation",
            Command::AcknowledgeEmergency => "acknowledge_emergency",
            Command::ClearLog => "clear_log",
        }
    }
}
