//! Gaze Pointer Agent - gaze-reactive pointer speed control.
//!
//! This library adapts the OS pointer speed to where the user is looking:
//! while the gaze fixates near the cursor the pointer slows down for fine
//! control, while it fixates far away the pointer speeds up to cover the
//! distance, and when the fixation ends a comfortable resting speed is
//! restored.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Gaze Pointer Agent                      │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌────────────┐    ┌────────────┐    ┌──────────────┐        │
//! │  │   Event    │───▶│  Fixation  │───▶│    Speed     │        │
//! │  │   source   │    │  tracker   │    │  controller  │        │
//! │  └────────────┘    └────────────┘    └──────┬───────┘        │
//! │        │                                    │                │
//! │        ▼                                    ▼                │
//! │  ┌────────────┐                      ┌──────────────┐        │
//! │  │ Telemetry  │                      │ Pointer host │        │
//! │  │    log     │                      │ (Win32/sim)  │        │
//! │  └────────────┘                      └──────────────┘        │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The event source delivers Begin / Data / End fixation events in order.
//! The tracker keeps the fixation-session state (begin timestamp, duration
//! at end); the controller turns each in-fixation sample into a clamped
//! speed request against the pointer host capability.
//!
//! # Example
//!
//! ```
//! use gaze_pointer_agent::{
//!     engine::{Engine, SpeedPolicy},
//!     event::FixationEvent,
//!     pointer::SimulatedPointerHost,
//! };
//!
//! let mut engine = Engine::new(SimulatedPointerHost::new(), SpeedPolicy::default());
//!
//! engine.handle(&FixationEvent::begin(50.0, 50.0, 1000.0)).unwrap();
//! engine.handle(&FixationEvent::data(52.0, 51.0, 1200.0)).unwrap();
//! engine.handle(&FixationEvent::end(52.0, 51.0, 3000.0)).unwrap();
//!
//! // Near sample slowed the pointer, then the end restored the resting speed.
//! let applied: Vec<u8> = engine.host().applied_speeds().iter().map(|s| s.get()).collect();
//! assert_eq!(applied, vec![1, 14]);
//! ```

pub mod config;
pub mod engine;
pub mod event;
pub mod pointer;
pub mod telemetry;

// Re-export key types at crate root for convenience
pub use config::{Config, SpeedSettings};
pub use engine::{Engine, EngineOutcome, EventError, PointerSpeed, SpeedDecision, SpeedPolicy};
pub use event::{FixationEvent, FixationKind, GazePoint, ReplaySource, SourceError, TraceInput};
pub use pointer::{Host, PointerError, PointerHost, SimulatedPointerHost};
pub use telemetry::{SessionLog, SessionStats, SharedSessionLog};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
