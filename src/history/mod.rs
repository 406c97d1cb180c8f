//! Motion history for diagnostics.
//!
//! The controller writes one [`LogEntry`] per step and per stop; collaborators read
//! the log or its filtered fault feed.

mod entry;
mod event_log;

pub use entry::{FaultRecord, LogEntry};
pub use event_log::{EventLog, EVENT_LOG_CAPACITY};
