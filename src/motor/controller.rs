//! Focus controller - the motion state machine.
//!
//! Owns position, target, speed and state, advances the half-step sequence when a
//! step is due, and records every step and stop into its event log.

use heapless::Vec;

use crate::clock::MonotonicClock;
use crate::config::{MotorConfig, TravelLimits};
use crate::error::{ErrorCode, Result};
use crate::history::{EventLog, FaultRecord, LogEntry, EVENT_LOG_CAPACITY};
use crate::motion::{CoilPattern, Direction, PhaseIndex, StepCadence};
use crate::status::StatusSnapshot;

use super::coils::CoilDriver;
use super::position::Position;
use super::state::{MotorEvent, MotorState};

/// What a call to [`FocusController::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Nothing to do: at the target and already at rest.
    Idle,
    /// Motion pending but the next step is not due yet.
    Waiting,
    /// One half-step was issued.
    Stepped(Direction),
    /// The target had been reached; coils were released.
    Arrived,
    /// Emergency stop in effect; nothing moves until a new target.
    Halted,
}

/// Open-loop half-step controller for a single focuser axis.
///
/// Generic over:
/// - `D`: coil driver (the four ULN2003 lines)
/// - `C`: event log capacity
///
/// All operations are non-blocking. Callers that share the controller between
/// tasks must serialize access (see [`SharedController`](super::SharedController)).
pub struct FocusController<D, const C: usize = EVENT_LOG_CAPACITY>
where
    D: CoilDriver,
{
    /// Coil driver.
    coils: D,

    /// Limits and speed bounds.
    config: MotorConfig,

    /// Current position.
    position: Position,

    /// Requested position, always within the travel bound.
    target: i32,

    /// Index into the half-step sequence.
    phase: PhaseIndex,

    /// Levels last written to the coil lines.
    lines: CoilPattern,

    /// Speed in steps/s, always within the configured bounds.
    speed: u32,

    /// Timing of the last step.
    cadence: StepCadence,

    /// Current state.
    state: MotorState,

    /// Whether the position was inside the soft-limit margin after the last step.
    near_limit: bool,

    /// Latest clock reading seen by `tick`, used to stamp stop entries.
    now_us: u64,

    /// Transition history.
    log: EventLog<C>,
}

impl<D, const C: usize> FocusController<D, C>
where
    D: CoilDriver,
{
    /// Create a controller at position 0 in the Idle state.
    ///
    /// The configuration is taken as-is; use
    /// [`FocusControllerBuilder`](super::FocusControllerBuilder) for validation.
    /// All coil lines are released so they start in a defined state.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::CoilError` if the lines could not be released.
    pub fn new(mut coils: D, config: MotorConfig) -> Result<Self> {
        coils.de_energize()?;

        let speed = config.clamp_speed(config.default_speed);
        info!(
            "focuser ready: max_steps={} steps_per_rotation={} speed={}",
            config.max_steps,
            config.steps_per_rotation,
            speed
        );

        Ok(Self {
            coils,
            config,
            position: Position::new(),
            target: 0,
            phase: PhaseIndex::default(),
            lines: CoilPattern::OFF,
            speed,
            cadence: StepCadence::default(),
            state: MotorState::Idle,
            near_limit: false,
            now_us: 0,
            log: EventLog::new(),
        })
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Get current position in steps.
    #[inline]
    pub fn current_position(&self) -> i32 {
        self.position.steps()
    }

    /// Get the target position in steps.
    #[inline]
    pub fn target_position(&self) -> i32 {
        self.target
    }

    /// Get the speed in steps/s.
    #[inline]
    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Get the current state.
    #[inline]
    pub fn state(&self) -> MotorState {
        self.state
    }

    /// Check if the controller is driving toward a target.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.state.is_active()
    }

    /// Get the current phase index.
    #[inline]
    pub fn phase_index(&self) -> PhaseIndex {
        self.phase
    }

    /// Levels last written to the coil lines.
    #[inline]
    pub fn coil_pattern(&self) -> CoilPattern {
        self.lines
    }

    /// Get the configuration.
    #[inline]
    pub fn config(&self) -> &MotorConfig {
        &self.config
    }

    /// Get the travel limits.
    #[inline]
    pub fn limits(&self) -> TravelLimits {
        self.config.limits()
    }

    /// Check if the current position is inside the soft-limit margin.
    #[inline]
    pub fn is_near_limit(&self) -> bool {
        self.limits().is_near_limit(self.position.steps())
    }

    /// Classify a candidate position against the current limits.
    #[inline]
    pub fn validate(&self, position: i32) -> ErrorCode {
        self.limits().validate(position)
    }

    /// Get the event log.
    #[inline]
    pub fn event_log(&self) -> &EventLog<C> {
        &self.log
    }

    /// Up to `max_entries` of the newest faults, oldest first.
    pub fn recent_faults(&self, max_entries: usize) -> Vec<FaultRecord, C> {
        let mut faults = Vec::new();
        for entry in self.log.recent_faults(max_entries).iter() {
            let _ = faults.push(FaultRecord::from(entry));
        }
        faults
    }

    /// Consistent snapshot for status reporting.
    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            current_position: self.position.steps(),
            target_position: self.target,
            speed: self.speed,
            state: self.state,
            running: self.state.is_active(),
            near_limit_warning: self.is_near_limit(),
            max_steps: self.config.max_steps,
            steps_per_rotation: self.config.steps_per_rotation,
            travel_percent: self.position.travel_percent(self.config.max_steps),
            angle_degrees: self.position.degrees(self.config.steps_per_rotation),
        }
    }

    /// Get the coil driver.
    #[inline]
    pub fn coils(&self) -> &D {
        &self.coils
    }

    /// Tear down the controller and return the coil driver.
    pub fn into_coils(self) -> D {
        self.coils
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Request motion to `position`.
    ///
    /// Out-of-range requests are clamped into the travel bound, never rejected.
    /// Returns the classification of the requested (unclamped) position so a
    /// caller can warn; the move is already scheduled regardless.
    ///
    /// With `emergency_latch` set, requests made during an emergency stop are
    /// ignored, logged as `InvalidPosition`, and that code is returned.
    pub fn set_target_position(&mut self, position: i32) -> ErrorCode {
        if self.state.is_emergency() && self.config.emergency_latch {
            warn!("target {} ignored: emergency stop not acknowledged", position);
            self.record(ErrorCode::InvalidPosition);
            return ErrorCode::InvalidPosition;
        }

        let code = self.validate(position);
        let clamped = self.limits().clamp(position);
        if clamped != position {
            warn!("target {} clamped to {}", position, clamped);
        }

        self.target = clamped;
        if self.target != self.position.steps() {
            self.transition(MotorEvent::TargetAccepted);
            debug!(
                "target {} accepted (current {})",
                self.target,
                self.position.steps()
            );
        }

        code
    }

    /// Move by a signed offset from the current position.
    pub fn nudge(&mut self, delta: i32) -> ErrorCode {
        let target = self.position.steps().saturating_add(delta);
        self.set_target_position(target)
    }

    /// Redefine the reference frame without moving: current and target both
    /// become `position` (clamped) and the state becomes Idle.
    ///
    /// Returns the classification of the requested position. With
    /// `emergency_latch` set, a re-zero during an emergency stop is refused like
    /// a new target.
    pub fn set_current_position(&mut self, position: i32) -> ErrorCode {
        if self.state.is_emergency() && self.config.emergency_latch {
            warn!("re-zero to {} ignored: emergency stop not acknowledged", position);
            self.record(ErrorCode::InvalidPosition);
            return ErrorCode::InvalidPosition;
        }

        let code = self.validate(position);
        let clamped = self.limits().clamp(position);

        info!("position redefined: {} -> {}", self.position.steps(), clamped);
        self.position.set_steps(clamped);
        self.target = clamped;
        self.near_limit = self.is_near_limit();
        self.transition(MotorEvent::Rezeroed);

        code
    }

    /// Set the speed in steps/s, clamped into the configured bounds.
    ///
    /// Takes effect on the next tick. Returns `InvalidSpeed` if clamping was needed.
    pub fn set_speed(&mut self, speed: u32) -> ErrorCode {
        let clamped = self.config.clamp_speed(speed);
        self.speed = clamped;

        if clamped != speed {
            debug!("speed {} clamped to {}", speed, clamped);
            ErrorCode::InvalidSpeed
        } else {
            ErrorCode::None
        }
    }

    /// Release the coils and enter Stopped. The target is kept.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::CoilError` if the lines could not be released; the
    /// state change and log entry happen regardless.
    pub fn stop(&mut self) -> Result<()> {
        self.halt(MotorEvent::StopRequested)?;
        info!("stopped at {}", self.position.steps());
        Ok(())
    }

    /// Pin the target to the current position, release the coils and enter
    /// EmergencyStop.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::CoilError` if the lines could not be released; the
    /// state change and log entry happen regardless.
    pub fn emergency_stop(&mut self) -> Result<()> {
        self.target = self.position.steps();
        warn!("emergency stop at {}", self.position.steps());
        self.halt(MotorEvent::EmergencyStopRequested)
    }

    /// Leave EmergencyStop for Stopped. Returns `false` if not in EmergencyStop.
    pub fn acknowledge_emergency(&mut self) -> bool {
        if !self.state.is_emergency() {
            return false;
        }
        self.transition(MotorEvent::EmergencyAcknowledged);
        info!("emergency stop acknowledged");
        true
    }

    /// Set the travel bound. Non-positive values are ignored.
    ///
    /// The target is re-clamped into the new bound.
    pub fn set_max_steps(&mut self, max_steps: i32) {
        if max_steps <= 0 {
            warn!("ignoring non-positive max_steps {}", max_steps);
            return;
        }

        self.config.max_steps = max_steps;
        self.target = self.limits().clamp(self.target);
        if !self.limits().contains(self.position.steps()) {
            warn!(
                "position {} outside new bound {}",
                self.position.steps(),
                max_steps
            );
        }
    }

    /// Set the steps per output revolution. Non-positive values are ignored.
    pub fn set_steps_per_rotation(&mut self, steps: i32) {
        if steps <= 0 {
            warn!("ignoring non-positive steps_per_rotation {}", steps);
            return;
        }
        self.config.steps_per_rotation = steps;
    }

    /// Record a collaborator-originated fault in the event log so it shows up
    /// in the fault feed.
    pub fn report_fault(&mut self, error: ErrorCode) {
        warn!("external fault: {}", error);
        self.record(error);
    }

    /// Drop the event log contents.
    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    // ------------------------------------------------------------------
    // Real-time update
    // ------------------------------------------------------------------

    /// Advance the controller to time `now_us` (monotonic microseconds).
    ///
    /// Issues at most one half-step, and only once `1_000_000 / speed` µs have
    /// passed since the previous one. Late calls do not produce catch-up bursts.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::CoilError` if the coil lines could not be written.
    /// A failed step leaves position and phase unchanged.
    pub fn tick(&mut self, now_us: u64) -> Result<TickOutcome> {
        self.now_us = now_us;

        if self.state.is_emergency() {
            return Ok(TickOutcome::Halted);
        }

        let Some(direction) = Direction::toward(self.position.steps(), self.target) else {
            if self.state.is_active() {
                self.halt(MotorEvent::TargetReached)?;
                info!("arrived at {}", self.position.steps());
                return Ok(TickOutcome::Arrived);
            }
            return Ok(TickOutcome::Idle);
        };

        let was = self.state;
        self.transition(MotorEvent::MotionPending);

        if !self.cadence.is_due(now_us, self.speed) {
            if self.state != was {
                self.record(ErrorCode::None);
            }
            return Ok(TickOutcome::Waiting);
        }

        let next = self.phase.next(direction);
        let pattern = next.pattern();
        if let Err(e) = self.coils.apply(pattern) {
            error!("coil write failed at {}", self.position.steps());
            return Err(e);
        }

        self.phase = next;
        self.lines = pattern;
        self.position.step(direction);
        self.cadence.mark(now_us);

        let near = self.is_near_limit();
        let code = if near && !self.near_limit {
            warn!("entering soft-limit zone at {}", self.position.steps());
            ErrorCode::SoftLimitWarning
        } else {
            ErrorCode::None
        };
        self.near_limit = near;

        trace!("step to {} phase {}", self.position.steps(), self.phase.value());
        self.record(code);

        Ok(TickOutcome::Stepped(direction))
    }

    /// [`tick`](Self::tick) using a clock source.
    pub fn tick_with<K: MonotonicClock>(&mut self, clock: &K) -> Result<TickOutcome> {
        self.tick(clock.now_us())
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    #[inline]
    fn transition(&mut self, event: MotorEvent) {
        self.state = self.state.transition(event);
    }

    /// Apply a stopping transition, release the lines, and log it.
    fn halt(&mut self, event: MotorEvent) -> Result<()> {
        self.transition(event);

        let released = self.coils.de_energize();
        match released {
            Ok(()) => self.lines = CoilPattern::OFF,
            Err(_) => error!("failed to release coils at {}", self.position.steps()),
        }

        self.record(ErrorCode::None);
        released
    }

    fn record(&mut self, error: ErrorCode) {
        self.log.append(LogEntry {
            timestamp_us: self.now_us,
            position: self.position.steps(),
            target_position: self.target,
            speed: self.speed,
            state: self.state,
            error,
        });
    }
}
