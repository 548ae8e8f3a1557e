//! Simulated in-memory pointer host.
//!
//! Serves three roles: the platform host on targets without a native
//! mouse-speed parameter, the deterministic test double for the controller
//! and engine, and the backing host for the replay demo. Applied speeds are
//! recorded so callers can assert on the exact sequence of writes.

use crate::engine::policy::{PointerSpeed, DEFAULT_RESTING_SPEED};
use crate::pointer::{PointerError, PointerHost};

/// In-memory pointer host with a scriptable cursor and recorded speed writes.
#[derive(Debug)]
pub struct SimulatedPointerHost {
    cursor: (i32, i32),
    speed: PointerSpeed,
    applied: Vec<PointerSpeed>,
    fail_queries: bool,
    fail_sets: bool,
}

impl Default for SimulatedPointerHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedPointerHost {
    pub fn new() -> Self {
        Self {
            cursor: (0, 0),
            speed: PointerSpeed::clamped(DEFAULT_RESTING_SPEED as i64),
            applied: Vec::new(),
            fail_queries: false,
            fail_sets: false,
        }
    }

    /// Move the simulated cursor.
    pub fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor = (x, y);
    }

    /// Make subsequent position queries fail.
    pub fn fail_queries(&mut self, fail: bool) {
        self.fail_queries = fail;
    }

    /// Make subsequent speed writes fail.
    pub fn fail_sets(&mut self, fail: bool) {
        self.fail_sets = fail;
    }

    /// Every speed that has been applied, in order.
    pub fn applied_speeds(&self) -> &[PointerSpeed] {
        &self.applied
    }

    /// The most recently applied speed, if any write happened.
    pub fn last_applied(&self) -> Option<PointerSpeed> {
        self.applied.last().copied()
    }
}

impl PointerHost for SimulatedPointerHost {
    fn cursor_position(&mut self) -> Result<(i32, i32), PointerError> {
        if self.fail_queries {
            return Err(PointerError::QueryFailed("simulated failure".to_string()));
        }
        Ok(self.cursor)
    }

    fn pointer_speed(&mut self) -> Result<PointerSpeed, PointerError> {
        Ok(self.speed)
    }

    fn apply_speed(&mut self, speed: PointerSpeed) -> Result<(), PointerError> {
        if self.fail_sets {
            return Err(PointerError::SetFailed("simulated failure".to_string()));
        }
        self.speed = speed;
        self.applied.push(speed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_applied_speeds() {
        let mut host = SimulatedPointerHost::new();
        host.apply_speed(PointerSpeed::clamped(1)).unwrap();
        host.apply_speed(PointerSpeed::clamped(20)).unwrap();

        let applied: Vec<u8> = host.applied_speeds().iter().map(|s| s.get()).collect();
        assert_eq!(applied, vec![1, 20]);
        assert_eq!(host.pointer_speed().unwrap().get(), 20);
    }

    #[test]
    fn test_scripted_failures() {
        let mut host = SimulatedPointerHost::new();
        host.fail_queries(true);
        assert!(matches!(
            host.cursor_position(),
            Err(PointerError::QueryFailed(_))
        ));

        host.fail_sets(true);
        assert!(matches!(
            host.apply_speed(PointerSpeed::MIN),
            Err(PointerError::SetFailed(_))
        ));
        assert!(host.applied_speeds().is_empty());
    }
}
