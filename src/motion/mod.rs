//! Motion module for focus-motion.
//!
//! Provides the half-step phase sequencer and step cadence timing.

mod cadence;
mod phase;

pub use cadence::{step_interval_us, StepCadence};
pub use phase::{CoilPattern, Direction, PhaseIndex, HALF_STEP_SEQUENCE, PHASE_COUNT};
