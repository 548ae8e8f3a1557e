//! Core engine: fixation tracking and proximity speed control.
//!
//! The surrounding collaborator owns event delivery and calls
//! `Engine::handle` once per event, in order. The engine routes Begin/End
//! through the tracker and forwards in-fixation samples to the speed
//! controller.

pub mod controller;
pub mod policy;
pub mod tracker;

// Re-export commonly used types
pub use controller::{SpeedController, SpeedDecision};
pub use policy::{PointerSpeed, SpeedPolicy, SPEED_MAX, SPEED_MIN};
pub use tracker::{EventError, FixationTracker, FixationUpdate};

use crate::event::types::{FixationEvent, GazePoint};
use crate::pointer::{PointerError, PointerHost};

/// What handling one event did.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineOutcome {
    /// A fixation started.
    FixationStarted { point: GazePoint },
    /// An in-fixation sample was processed. `decision` is `None` when the
    /// cursor query failed and the speed change was skipped for this event.
    SpeedAdjusted {
        point: GazePoint,
        decision: Option<SpeedDecision>,
    },
    /// A fixation ended; the resting speed was requested.
    FixationEnded { point: GazePoint, duration_ms: f64 },
}

/// The core engine: one `handle` entry point per fixation event.
pub struct Engine<H: PointerHost> {
    tracker: FixationTracker,
    controller: SpeedController<H>,
}

impl<H: PointerHost> Engine<H> {
    pub fn new(host: H, policy: SpeedPolicy) -> Self {
        Self {
            tracker: FixationTracker::new(),
            controller: SpeedController::new(host, policy),
        }
    }

    /// Handle one fixation event.
    ///
    /// Only a malformed event kind is an error; host failures are handled
    /// per their severity (query failures skip the decision, write failures
    /// are swallowed by the controller).
    pub fn handle(&mut self, event: &FixationEvent) -> Result<EngineOutcome, EventError> {
        match self.tracker.handle(event)? {
            FixationUpdate::Started { point } => {
                tracing::info!(x = point.x, y = point.y, "Fixation started");
                Ok(EngineOutcome::FixationStarted { point })
            }
            FixationUpdate::Sample { point } => {
                let decision = match self.controller.on_fixation_sample(point) {
                    Ok(decision) => {
                        tracing::debug!(
                            distance_sq = decision.distance_sq,
                            speed = decision.speed.get(),
                            "Speed decision"
                        );
                        Some(decision)
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Cursor query failed, skipping speed decision");
                        None
                    }
                };
                Ok(EngineOutcome::SpeedAdjusted { point, decision })
            }
            FixationUpdate::Ended { point, duration_ms } => {
                let resting = self.controller.on_fixation_end();
                tracing::info!(
                    x = point.x,
                    y = point.y,
                    duration_ms,
                    resting = resting.get(),
                    "Fixation ended"
                );
                Ok(EngineOutcome::FixationEnded { point, duration_ms })
            }
        }
    }

    /// Apply an arbitrary clamped speed through the host (startup/shutdown
    /// restores).
    pub fn apply_speed(&mut self, speed: PointerSpeed) {
        self.controller.apply(speed);
    }

    /// Read the host's current speed (used to capture the pre-session value).
    pub fn current_speed(&mut self) -> Result<PointerSpeed, PointerError> {
        self.controller.host_mut().pointer_speed()
    }

    pub fn host(&self) -> &H {
        self.controller.host()
    }

    pub fn host_mut(&mut self) -> &mut H {
        self.controller.host_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::SimulatedPointerHost;

    fn engine() -> Engine<SimulatedPointerHost> {
        Engine::new(SimulatedPointerHost::new(), SpeedPolicy::default())
    }

    #[test]
    fn test_full_fixation_sequence() {
        let mut engine = engine();
        engine.host_mut().set_cursor(50, 50);

        engine
            .handle(&FixationEvent::begin(50.0, 50.0, 1000.0))
            .unwrap();

        // Near sample: distance² = 4 + 1 = 5 → slow.
        let near = engine
            .handle(&FixationEvent::data(52.0, 51.0, 1200.0))
            .unwrap();
        match near {
            EngineOutcome::SpeedAdjusted { decision, .. } => {
                assert_eq!(decision.unwrap().speed.get(), 1)
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        // Far sample → fast.
        engine
            .handle(&FixationEvent::data(500.0, 500.0, 1400.0))
            .unwrap();

        // End → resting speed and measured duration.
        let end = engine
            .handle(&FixationEvent::end(500.0, 500.0, 3000.0))
            .unwrap();
        match end {
            EngineOutcome::FixationEnded { duration_ms, .. } => {
                assert_eq!(duration_ms, 2000.0)
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        let applied: Vec<u8> = engine
            .host()
            .applied_speeds()
            .iter()
            .map(|s| s.get())
            .collect();
        assert_eq!(applied, vec![1, 20, 14]);
    }

    #[test]
    fn test_query_failure_yields_no_decision() {
        let mut engine = engine();
        engine.host_mut().fail_queries(true);

        let outcome = engine
            .handle(&FixationEvent::data(10.0, 10.0, 100.0))
            .unwrap();
        assert_eq!(
            outcome,
            EngineOutcome::SpeedAdjusted {
                point: GazePoint::new(10.0, 10.0),
                decision: None,
            }
        );
        assert!(engine.host().applied_speeds().is_empty());
    }

    #[test]
    fn test_unknown_kind_issues_no_speed_write() {
        let mut engine = engine();
        let event = FixationEvent {
            kind: 42,
            x: 0.0,
            y: 0.0,
            timestamp_ms: 0.0,
        };
        assert!(engine.handle(&event).is_err());
        assert!(engine.host().applied_speeds().is_empty());
    }
}
