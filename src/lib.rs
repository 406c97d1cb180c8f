//! # focus-motion
//!
//! Open-loop focus control for a 28BYJ-48 class geared stepper driven through a
//! ULN2003 array, with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Half-step sequencing**: 8-phase coil table, one step per due tick
//! - **Safety validator**: hard travel bound with a soft-limit warning margin
//! - **Motion state machine**: Idle / Running / Stopped / EmergencyStop
//! - **Event log**: fixed 50-entry history with a filtered fault feed
//! - **no_std compatible**: no allocation, `heapless` storage throughout
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use focus_motion::{FocusController, Uln2003Driver, SystemConfig};
//!
//! let config: SystemConfig = focus_motion::load_config("focuser.toml")?;
//!
//! let mut focuser = FocusController::builder()
//!     .from_config(&config)
//!     .coils(Uln2003Driver::new(in1, in2, in3, in4))
//!     .build()?;
//!
//! focuser.set_target_position(1200);
//! loop {
//!     focuser.tick(clock.now_us())?;
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing (implies `alloc`)
//! - `alloc`: Enables deserializing [`Command`] on no_std targets with an allocator
//! - `defmt`: Enables defmt logging for embedded targets
//! - `log`: Enables logging through the `log` facade on hosts

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

// Must come first so the logging macros are visible to every module.
#[macro_use]
mod fmt;

// Core modules
pub mod clock;
pub mod config;
pub mod error;
pub mod history;
pub mod motion;
pub mod motor;
pub mod persistence;
pub mod status;

// Re-exports for ergonomic API
pub use clock::MonotonicClock;
pub use config::{validate_config, MotorConfig, SystemConfig, TravelLimits};
pub use error::{Error, ErrorCode, Result};
pub use history::{EventLog, FaultRecord, LogEntry, EVENT_LOG_CAPACITY};
pub use motion::{CoilPattern, Direction, PhaseIndex, HALF_STEP_SEQUENCE};
pub use motor::{
    state, CoilDriver, Command, FocusController, FocusControllerBuilder, MotorState,
    SharedController, SimulatedCoils, TickOutcome, Uln2003Driver,
};
pub use persistence::{restore_position, MemoryStore, PersistenceSchedule, PositionStore};
pub use status::{StatusSchedule, StatusSnapshot};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use clock::StdClock;
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Degrees, TravelPercent};
