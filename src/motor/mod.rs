//! Motor module for focus-motion.
//!
//! Provides the focus controller state machine, its coil drivers, and the ways
//! collaborators drive it.

mod builder;
mod coils;
mod command;
mod controller;
mod position;
mod shared;
pub mod state;

pub use builder::FocusControllerBuilder;
pub use coils::{CoilDriver, SimulatedCoils, Uln2003Driver};
pub use command::Command;
pub use controller::{FocusController, TickOutcome};
pub use position::Position;
pub use shared::SharedController;
pub use state::{MotorEvent, MotorState};
