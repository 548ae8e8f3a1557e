//! Fixation session tracking.
//!
//! Tracks the begin timestamp of the current fixation so End events can
//! report a duration. A zero timestamp is the "no fixation has begun yet"
//! sentinel; End events before any Begin therefore report a zero duration
//! instead of garbage.

use crate::event::types::{FixationEvent, FixationKind, GazePoint};

/// Errors raised while classifying fixation events.
#[derive(Debug, PartialEq, Eq)]
pub enum EventError {
    /// The event carried a kind code outside the device contract. Fatal for
    /// the event; the caller decides whether to skip or abort the stream.
    UnrecognizedKind(u8),
}

impl std::fmt::Display for EventError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventError::UnrecognizedKind(code) => {
                write!(f, "Unrecognized fixation event kind: {code}")
            }
        }
    }
}

impl std::error::Error for EventError {}

/// What a handled event means for the session.
#[derive(Debug, Clone, PartialEq)]
pub enum FixationUpdate {
    /// A fixation started at the given point.
    Started { point: GazePoint },
    /// A position sample during a fixation, to be forwarded to the speed
    /// controller. Also produced for stray samples before any Begin; there
    /// is no hard precondition on session state.
    Sample { point: GazePoint },
    /// The fixation ended; `duration_ms` is measured from the most recent
    /// Begin, or zero if none has been seen.
    Ended { point: GazePoint, duration_ms: f64 },
}

/// Fixation session state machine.
#[derive(Debug, Default)]
pub struct FixationTracker {
    /// Timestamp of the most recent Begin; 0.0 means none yet. Deliberately
    /// never cleared at End: consecutive End events without an intervening
    /// Begin reuse the stale Begin, matching the long-standing device-stream
    /// behavior.
    begin_timestamp_ms: f64,
}

impl FixationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a Begin has been observed this session.
    pub fn has_begun(&self) -> bool {
        self.begin_timestamp_ms > 0.0
    }

    /// Classify one fixation event and update session state.
    ///
    /// Begin overwrites the stored timestamp unconditionally: a Begin during
    /// an ongoing fixation restarts the timer (last Begin wins, matching
    /// trackers that restart a fixation without an intervening End).
    pub fn handle(&mut self, event: &FixationEvent) -> Result<FixationUpdate, EventError> {
        let kind = FixationKind::from_code(event.kind)
            .ok_or(EventError::UnrecognizedKind(event.kind))?;
        let point = event.point();

        match kind {
            FixationKind::Begin => {
                self.begin_timestamp_ms = event.timestamp_ms;
                Ok(FixationUpdate::Started { point })
            }
            FixationKind::Data => Ok(FixationUpdate::Sample { point }),
            FixationKind::End => {
                let duration_ms = if self.begin_timestamp_ms > 0.0 {
                    event.timestamp_ms - self.begin_timestamp_ms
                } else {
                    0.0
                };
                Ok(FixationUpdate::Ended { point, duration_ms })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_then_end_reports_duration() {
        let mut tracker = FixationTracker::new();
        tracker
            .handle(&FixationEvent::begin(50.0, 50.0, 1000.0))
            .unwrap();

        let update = tracker
            .handle(&FixationEvent::end(500.0, 500.0, 3000.0))
            .unwrap();
        assert_eq!(
            update,
            FixationUpdate::Ended {
                point: GazePoint::new(500.0, 500.0),
                duration_ms: 2000.0,
            }
        );
    }

    #[test]
    fn test_end_without_begin_reports_zero() {
        let mut tracker = FixationTracker::new();
        let update = tracker
            .handle(&FixationEvent::end(10.0, 10.0, 5000.0))
            .unwrap();
        match update {
            FixationUpdate::Ended { duration_ms, .. } => assert_eq!(duration_ms, 0.0),
            other => panic!("unexpected update: {other:?}"),
        }
    }

    #[test]
    fn test_data_before_begin_is_tolerated() {
        let mut tracker = FixationTracker::new();
        let update = tracker
            .handle(&FixationEvent::data(30.0, 40.0, 100.0))
            .unwrap();
        assert_eq!(
            update,
            FixationUpdate::Sample {
                point: GazePoint::new(30.0, 40.0)
            }
        );
        assert!(!tracker.has_begun());
    }

    #[test]
    fn test_last_begin_wins() {
        let mut tracker = FixationTracker::new();
        tracker
            .handle(&FixationEvent::begin(0.0, 0.0, 1000.0))
            .unwrap();
        tracker
            .handle(&FixationEvent::begin(0.0, 0.0, 2500.0))
            .unwrap();

        let update = tracker.handle(&FixationEvent::end(0.0, 0.0, 3000.0)).unwrap();
        match update {
            FixationUpdate::Ended { duration_ms, .. } => assert_eq!(duration_ms, 500.0),
            other => panic!("unexpected update: {other:?}"),
        }
    }

    #[test]
    fn test_consecutive_ends_reuse_stale_begin() {
        // Pins the legacy behavior: the sentinel is not cleared at End, so a
        // second End without a new Begin measures against the old Begin.
        let mut tracker = FixationTracker::new();
        tracker
            .handle(&FixationEvent::begin(0.0, 0.0, 1000.0))
            .unwrap();
        tracker.handle(&FixationEvent::end(0.0, 0.0, 2000.0)).unwrap();

        let update = tracker.handle(&FixationEvent::end(0.0, 0.0, 4000.0)).unwrap();
        match update {
            FixationUpdate::Ended { duration_ms, .. } => assert_eq!(duration_ms, 3000.0),
            other => panic!("unexpected update: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_kind_is_an_error() {
        let mut tracker = FixationTracker::new();
        let event = FixationEvent {
            kind: 9,
            x: 0.0,
            y: 0.0,
            timestamp_ms: 0.0,
        };
        assert_eq!(
            tracker.handle(&event),
            Err(EventError::UnrecognizedKind(9))
        );
    }
}
