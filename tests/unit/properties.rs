//! Property tests for the validator, the event log and the phase sequencer.

use proptest::prelude::*;

use focus_motion::config::TravelLimits;
use focus_motion::{
    Direction, ErrorCode, EventLog, LogEntry, MotorState, PhaseIndex, EVENT_LOG_CAPACITY,
};

fn entry(n: usize, faulted: bool) -> LogEntry {
    LogEntry {
        timestamp_us: n as u64,
        position: 0,
        target_position: 0,
        speed: 100,
        state: MotorState::Running,
        error: if faulted {
            ErrorCode::SoftLimitWarning
        } else {
            ErrorCode::None
        },
    }
}

proptest! {
    #[test]
    fn clamp_stays_in_bounds(max in 1i32..=1_000_000, pos in any::<i32>()) {
        let limits = TravelLimits::new(max, 0);
        let clamped = limits.clamp(pos);

        prop_assert!((-max..=max).contains(&clamped));
        prop_assert_eq!(limits.clamp(clamped), clamped);
        if limits.contains(pos) {
            prop_assert_eq!(clamped, pos);
        }
    }

    #[test]
    fn validator_zones_partition(
        max in 1i32..=100_000,
        margin_frac in 0.0f64..1.0,
        pos in any::<i32>(),
    ) {
        let margin = (f64::from(max) * margin_frac) as i32;
        let limits = TravelLimits::new(max, margin);
        let distance = i64::from(pos).abs();

        let expected = if distance > i64::from(max) {
            ErrorCode::HardLimitExceeded
        } else if distance > i64::from(max - margin) {
            ErrorCode::SoftLimitWarning
        } else {
            ErrorCode::None
        };

        prop_assert_eq!(limits.validate(pos), expected);
        prop_assert_eq!(limits.validate(pos), limits.validate(pos.saturating_neg()));
    }

    #[test]
    fn log_keeps_newest_in_order(k in 0usize..200) {
        let mut log: EventLog = EventLog::new();
        for n in 0..k {
            log.append(entry(n, false));
        }

        let count = k.min(EVENT_LOG_CAPACITY);
        prop_assert_eq!(log.count(), count);
        for i in 0..count {
            let stamp = log.entry_at(i).map(|e| e.timestamp_us);
            prop_assert_eq!(stamp, Some((k - count + i) as u64));
        }
        prop_assert!(log.entry_at(count).is_none());
    }

    #[test]
    fn recent_faults_are_newest_and_ordered(
        faulted in proptest::collection::vec(any::<bool>(), 0..120),
        max in 0usize..60,
    ) {
        let mut log: EventLog = EventLog::new();
        for (n, f) in faulted.iter().enumerate() {
            log.append(entry(n, *f));
        }

        let retained: Vec<u64> = log
            .iter()
            .filter(|e| e.is_fault())
            .map(|e| e.timestamp_us)
            .collect();
        let faults = log.recent_faults(max);
        let got: Vec<u64> = faults.iter().map(|e| e.timestamp_us).collect();

        let take = retained.len().min(max);
        prop_assert_eq!(&got[..], &retained[retained.len() - take..]);
    }

    #[test]
    fn phase_walk_matches_step_count(moves in proptest::collection::vec(any::<bool>(), 0..100)) {
        let mut index = PhaseIndex::default();
        let mut net: i64 = 0;
        for forward in moves {
            if forward {
                index.advance(Direction::Forward);
                net += 1;
            } else {
                index.advance(Direction::Reverse);
                net -= 1;
            }
        }

        prop_assert_eq!(i64::from(index.value()), net.rem_euclid(8));
    }
}
