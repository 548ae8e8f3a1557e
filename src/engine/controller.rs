//! Proximity speed controller.
//!
//! On each in-fixation sample the controller reads the cursor position
//! fresh (it moves independently of the gaze), computes the squared
//! distance to the fixation point, and asks the host to apply the policy
//! speed. Speed writes are best-effort: a failed write is logged and
//! swallowed so one bad write never stalls the event stream.

use crate::engine::policy::{PointerSpeed, SpeedPolicy};
use crate::event::types::GazePoint;
use crate::pointer::{PointerError, PointerHost};

/// The outcome of one proximity decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedDecision {
    /// Squared gaze-to-cursor distance the decision was based on.
    pub distance_sq: f64,
    /// The speed requested from the host (already clamped).
    pub speed: PointerSpeed,
}

/// Drives the host pointer speed from fixation samples.
pub struct SpeedController<H: PointerHost> {
    host: H,
    policy: SpeedPolicy,
}

impl<H: PointerHost> SpeedController<H> {
    pub fn new(host: H, policy: SpeedPolicy) -> Self {
        Self { host, policy }
    }

    /// React to an in-fixation position sample.
    ///
    /// A cursor-query failure propagates so the caller can skip this event's
    /// decision; no speed change is applied in that case.
    pub fn on_fixation_sample(
        &mut self,
        point: GazePoint,
    ) -> Result<SpeedDecision, PointerError> {
        let (cursor_x, cursor_y) = self.host.cursor_position()?;
        let distance_sq = point.distance_sq_to(cursor_x, cursor_y);
        let speed = self.policy.speed_for(distance_sq);

        self.apply_best_effort(speed);
        Ok(SpeedDecision { distance_sq, speed })
    }

    /// React to the end of a fixation: fall back to the resting speed,
    /// regardless of where the fixation ended.
    pub fn on_fixation_end(&mut self) -> PointerSpeed {
        let resting = self.policy.resting();
        self.apply_best_effort(resting);
        resting
    }

    /// Apply an arbitrary speed through the same best-effort path. Used by
    /// the agent for startup/shutdown restores.
    pub fn apply(&mut self, speed: PointerSpeed) {
        self.apply_best_effort(speed);
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn apply_best_effort(&mut self, speed: PointerSpeed) {
        if let Err(e) = self.host.apply_speed(speed) {
            tracing::warn!(speed = speed.get(), error = %e, "Pointer speed write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::SimulatedPointerHost;

    fn controller() -> SpeedController<SimulatedPointerHost> {
        SpeedController::new(SimulatedPointerHost::new(), SpeedPolicy::default())
    }

    #[test]
    fn test_near_sample_selects_slow_speed() {
        let mut controller = controller();
        controller.host_mut().set_cursor(50, 50);

        let decision = controller
            .on_fixation_sample(GazePoint::new(52.0, 51.0))
            .unwrap();
        assert_eq!(decision.distance_sq, 5.0);
        assert_eq!(decision.speed.get(), 1);
        assert_eq!(controller.host().last_applied().unwrap().get(), 1);
    }

    #[test]
    fn test_far_sample_selects_fast_speed() {
        let mut controller = controller();
        controller.host_mut().set_cursor(50, 50);

        let decision = controller
            .on_fixation_sample(GazePoint::new(500.0, 500.0))
            .unwrap();
        assert!(decision.distance_sq >= 10_000.0);
        assert_eq!(decision.speed.get(), 20);
    }

    #[test]
    fn test_boundary_distance_selects_fast_speed() {
        let mut controller = controller();
        controller.host_mut().set_cursor(0, 0);

        // Cursor at origin, fixation 100 px away: distance² is exactly 10000.
        let decision = controller
            .on_fixation_sample(GazePoint::new(100.0, 0.0))
            .unwrap();
        assert_eq!(decision.distance_sq, 10_000.0);
        assert_eq!(decision.speed.get(), 20);
    }

    #[test]
    fn test_fixation_end_applies_resting_speed() {
        let mut controller = controller();
        let resting = controller.on_fixation_end();
        assert_eq!(resting.get(), 14);
        assert_eq!(controller.host().last_applied().unwrap().get(), 14);
    }

    #[test]
    fn test_query_failure_skips_decision() {
        let mut controller = controller();
        controller.host_mut().fail_queries(true);

        let result = controller.on_fixation_sample(GazePoint::new(0.0, 0.0));
        assert!(matches!(result, Err(PointerError::QueryFailed(_))));
        assert!(controller.host().applied_speeds().is_empty());
    }

    #[test]
    fn test_set_failure_is_swallowed() {
        let mut controller = controller();
        controller.host_mut().set_cursor(50, 50);
        controller.host_mut().fail_sets(true);

        // The decision is still returned even though the write failed.
        let decision = controller
            .on_fixation_sample(GazePoint::new(52.0, 51.0))
            .unwrap();
        assert_eq!(decision.speed.get(), 1);
        assert!(controller.host().applied_speeds().is_empty());
    }
}
