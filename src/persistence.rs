//! Position persistence boundary.
//!
//! The controller never touches storage. A [`PositionStore`] is handed the position
//! at startup and whenever [`PersistenceSchedule`] decides it is worth writing.

use crate::config::PersistenceConfig;
use crate::error::ErrorCode;
use crate::motor::{CoilDriver, FocusController};

/// Non-volatile home for the last known position.
pub trait PositionStore {
    /// Last saved position, if any.
    fn load(&mut self) -> Option<i32>;

    /// Persist `position`.
    fn save(&mut self, position: i32);
}

impl<T: PositionStore + ?Sized> PositionStore for &mut T {
    fn load(&mut self) -> Option<i32> {
        (**self).load()
    }

    fn save(&mut self, position: i32) {
        (**self).save(position)
    }
}

/// Store that only lives as long as the process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryStore {
    position: Option<i32>,
    saves: u32,
}

impl MemoryStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self {
            position: None,
            saves: 0,
        }
    }

    /// Create a store holding `position`.
    pub const fn with_position(position: i32) -> Self {
        Self {
            position: Some(position),
            saves: 0,
        }
    }

    /// Number of saves so far.
    pub fn saves(&self) -> u32 {
        self.saves
    }
}

impl PositionStore for MemoryStore {
    fn load(&mut self) -> Option<i32> {
        self.position
    }

    fn save(&mut self, position: i32) {
        self.position = Some(position);
        self.saves = self.saves.wrapping_add(1);
    }
}

/// Seed the controller from the store at startup.
///
/// An out-of-range value is clamped and reported as `PositionStateCorrupted`,
/// which also lands in the fault feed. An empty store leaves the controller alone.
pub fn restore_position<S, D, const C: usize>(
    store: &mut S,
    controller: &mut FocusController<D, C>,
) -> ErrorCode
where
    S: PositionStore,
    D: CoilDriver,
{
    let Some(saved) = store.load() else {
        debug!("no saved position");
        return ErrorCode::None;
    };

    if controller.validate(saved) == ErrorCode::HardLimitExceeded {
        controller.set_current_position(saved);
        warn!(
            "saved position {} outside travel, clamped to {}",
            saved,
            controller.current_position()
        );
        controller.report_fault(ErrorCode::PositionStateCorrupted);
        return ErrorCode::PositionStateCorrupted;
    }

    controller.set_current_position(saved);
    info!("restored position {}", saved);
    ErrorCode::None
}

/// Decides when the current position should be written out.
///
/// A changed position is saved right away once the controller comes to rest, and
/// at most every `save_interval_ms` while it is moving.
#[derive(Debug, Clone, Copy)]
pub struct PersistenceSchedule {
    interval_us: u64,
    last_saved: Option<i32>,
    last_save_us: u64,
}

impl PersistenceSchedule {
    /// Create a schedule from configuration.
    pub fn new(config: &PersistenceConfig) -> Self {
        Self {
            interval_us: u64::from(config.save_interval_ms) * 1000,
            last_saved: None,
            last_save_us: 0,
        }
    }

    /// Treat `position` as already persisted, e.g. right after a restore.
    pub fn mark_saved(&mut self, position: i32, now_us: u64) {
        self.last_saved = Some(position);
        self.last_save_us = now_us;
    }

    /// Last position handed to the store.
    pub fn last_saved(&self) -> Option<i32> {
        self.last_saved
    }

    /// Check whether `position` should be saved now.
    pub fn is_due(&self, position: i32, running: bool, now_us: u64) -> bool {
        if self.last_saved == Some(position) {
            return false;
        }
        !running || now_us.saturating_sub(self.last_save_us) >= self.interval_us
    }

    /// Save the controller position if due. Returns `true` if a save happened.
    pub fn poll<S, D, const C: usize>(
        &mut self,
        store: &mut S,
        controller: &FocusController<D, C>,
        now_us: u64,
    ) -> bool
    where
        S: PositionStore,
        D: CoilDriver,
    {
        let position = controller.current_position();
        if !self.is_due(position, controller.is_running(), now_us) {
            return false;
        }

        store.save(position);
        self.mark_saved(position, now_us);
        trace!("position {} saved", position);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MotorConfig;
    use crate::motor::SimulatedCoils;

    fn controller() -> FocusController<SimulatedCoils> {
        FocusController::new(SimulatedCoils::new(), MotorConfig::default()).unwrap()
    }

    #[test]
    fn test_restore_in_range() {
        let mut store = MemoryStore::with_position(-3000);
        let mut ctrl = controller();

        assert_eq!(restore_position(&mut store, &mut ctrl), ErrorCode::None);
        assert_eq!(ctrl.current_position(), -3000);
        assert_eq!(ctrl.target_position(), -3000);
    }

    #[test]
    fn test_restore_corrupted_value() {
        let mut store = MemoryStore::with_position(999_999);
        let mut ctrl = controller();

        assert_eq!(
            restore_position(&mut store, &mut ctrl),
            ErrorCode::PositionStateCorrupted
        );
        assert_eq!(ctrl.current_position(), 20_000);
        assert_eq!(
            ctrl.recent_faults(1)[0].error,
            ErrorCode::PositionStateCorrupted
        );
    }

    #[test]
    fn test_restore_empty_store() {
        let mut store = MemoryStore::new();
        let mut ctrl = controller();
        assert_eq!(restore_position(&mut store, &mut ctrl), ErrorCode::None);
        assert_eq!(ctrl.current_position(), 0);
    }

    #[test]
    fn test_schedule_throttles_while_running() {
        let mut schedule = PersistenceSchedule::new(&PersistenceConfig {
            save_interval_ms: 5000,
        });
        schedule.mark_saved(0, 0);

        assert!(!schedule.is_due(0, false, 10_000_000));
        assert!(!schedule.is_due(10, true, 4_999_999));
        assert!(schedule.is_due(10, true, 5_000_000));
        assert!(schedule.is_due(10, false, 1));
    }

    #[test]
    fn test_poll_saves_on_arrival() {
        let mut store = MemoryStore::new();
        let mut schedule = PersistenceSchedule::new(&PersistenceConfig::default());
        let mut ctrl = controller();
        schedule.mark_saved(0, 0);

        ctrl.set_target_position(3);
        for n in 1..=3u64 {
            ctrl.tick(n * 10_000).unwrap();
            assert!(!schedule.poll(&mut store, &ctrl, n * 10_000));
        }
        ctrl.tick(40_000).unwrap();

        assert!(schedule.poll(&mut store, &ctrl, 40_000));
        assert_eq!(store.load(), Some(3));
        assert!(!schedule.poll(&mut store, &ctrl, 50_000));
        assert_eq!(store.saves(), 1);
    }
}
