//! Fixation event model and event delivery.
//!
//! `types` defines the wire-level event format shared with device bridges;
//! `replay` delivers trace events over a channel the way a live transport
//! would.

pub mod replay;
pub mod types;

// Re-export commonly used types
pub use replay::{ReplaySource, SourceError, TraceInput};
pub use types::{FixationEvent, FixationKind, GazePoint, KIND_BEGIN, KIND_DATA, KIND_END};
