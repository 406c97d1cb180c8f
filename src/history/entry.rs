//! Event log records.

use serde::Serialize;

use crate::error::ErrorCode;
use crate::motor::MotorState;

/// Snapshot of the controller taken right after a transition.
///
/// Immutable once written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LogEntry {
    /// Monotonic time of the transition, in microseconds.
    pub timestamp_us: u64,
    /// Current position after the transition.
    pub position: i32,
    /// Target position after the transition.
    pub target_position: i32,
    /// Speed in effect (steps/s).
    pub speed: u32,
    /// State after the transition.
    pub state: MotorState,
    /// Outcome that accompanied the transition.
    pub error: ErrorCode,
}

impl LogEntry {
    /// Check if this entry carries a non-trivial outcome.
    #[inline]
    pub fn is_fault(&self) -> bool {
        self.error.is_fault()
    }
}

/// Reduced view of a faulted [`LogEntry`] for diagnostics feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaultRecord {
    /// Monotonic time of the transition, in microseconds.
    pub timestamp_us: u64,
    /// Position at the time.
    pub position: i32,
    /// What went wrong.
    pub error: ErrorCode,
}

impl From<&LogEntry> for FaultRecord {
    fn from(entry: &LogEntry) -> Self {
        Self {
            timestamp_us: entry.timestamp_us,
            position: entry.position,
            error: entry.error,
        }
    }
}
