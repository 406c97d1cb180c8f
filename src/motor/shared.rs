//! Controller shared between the tick loop and request handlers.
//!
//! Every access runs inside a critical section, so a status reader never sees a
//! half-updated controller and a command never interleaves with a step.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Vec;

use crate::error::{ErrorCode, Result};
use crate::history::{FaultRecord, EVENT_LOG_CAPACITY};
use crate::status::StatusSnapshot;

use super::coils::CoilDriver;
use super::command::Command;
use super::controller::{FocusController, TickOutcome};

/// A [`FocusController`] behind a critical-section mutex.
///
/// Can live in a `static` once constructed with a `const`-friendly driver, or be
/// shared by reference between tasks.
pub struct SharedController<D, const C: usize = EVENT_LOG_CAPACITY>
where
    D: CoilDriver,
{
    inner: Mutex<RefCell<FocusController<D, C>>>,
}

impl<D, const C: usize> SharedController<D, C>
where
    D: CoilDriver,
{
    /// Wrap a controller.
    pub const fn new(controller: FocusController<D, C>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(controller)),
        }
    }

    /// Run `f` with exclusive access to the controller.
    pub fn lock<R>(&self, f: impl FnOnce(&mut FocusController<D, C>) -> R) -> R {
        critical_section::with(|cs| f(&mut *self.inner.borrow_ref_mut(cs)))
    }

    /// Advance the controller to `now_us`.
    ///
    /// # Errors
    ///
    /// See [`FocusController::tick`].
    pub fn tick(&self, now_us: u64) -> Result<TickOutcome> {
        self.lock(|ctrl| ctrl.tick(now_us))
    }

    /// Execute a command.
    ///
    /// # Errors
    ///
    /// See [`FocusController::apply`].
    pub fn submit(&self, command: Command) -> Result<ErrorCode> {
        self.lock(|ctrl| ctrl.apply(command))
    }

    /// Consistent status snapshot.
    pub fn snapshot(&self) -> StatusSnapshot {
        self.lock(|ctrl| ctrl.status())
    }

    /// Up to `max_entries` of the newest faults, oldest first.
    pub fn recent_faults(&self, max_entries: usize) -> Vec<FaultRecord, C> {
        self.lock(|ctrl| ctrl.recent_faults(max_entries))
    }

    /// Take the controller back.
    pub fn into_inner(self) -> FocusController<D, C> {
        self.inner.into_inner().into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MotorConfig;
    use crate::motor::{MotorState, SimulatedCoils};

    #[test]
    fn test_commands_and_ticks_from_threads() {
        let ctrl: FocusController<_> = FocusController::new(SimulatedCoils::new(), MotorConfig::default()).unwrap();
        let shared = SharedController::new(ctrl);

        shared.submit(Command::MoveTo { position: 40 }).unwrap();

        std::thread::scope(|s| {
            s.spawn(|| {
                for n in 1..=60u64 {
                    shared.tick(n * 10_000).unwrap();
                }
            });
            s.spawn(|| {
                for _ in 0..100 {
                    let status = shared.snapshot();
                    assert!(status.current_position >= 0 && status.current_position <= 40);
                    assert!(status.target_position == 40);
                }
            });
        });

        let status = shared.snapshot();
        assert_eq!(status.current_position, 40);
        assert_eq!(status.state, MotorState::Stopped);

        let ctrl = shared.into_inner();
        assert!(ctrl.coils().pattern().is_off());
    }
}
