//! Fixation event types as delivered by an eye-tracker bridge.
//!
//! Events arrive with a raw kind code so that a malformed stream can be
//! detected and rejected instead of silently mapped to a known kind.

use serde::{Deserialize, Serialize};

/// Raw kind code for a fixation-begin event.
pub const KIND_BEGIN: u8 = 0;
/// Raw kind code for an in-fixation data sample.
pub const KIND_DATA: u8 = 1;
/// Raw kind code for a fixation-end event.
pub const KIND_END: u8 = 2;

/// Decoded fixation event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FixationKind {
    /// The user's gaze settled on a point; a fixation started.
    Begin,
    /// A position sample during an ongoing fixation.
    Data,
    /// The fixation ended.
    End,
}

impl FixationKind {
    /// Decode a raw wire code. Returns `None` for codes outside the contract.
    pub fn from_code(code: u8) -> Option<FixationKind> {
        match code {
            KIND_BEGIN => Some(FixationKind::Begin),
            KIND_DATA => Some(FixationKind::Data),
            KIND_END => Some(FixationKind::End),
            _ => None,
        }
    }

    /// The wire code for this kind.
    pub fn code(self) -> u8 {
        match self {
            FixationKind::Begin => KIND_BEGIN,
            FixationKind::Data => KIND_DATA,
            FixationKind::End => KIND_END,
        }
    }
}

/// A fixation point in screen pixel coordinates.
///
/// Trackers report fractional pixels, so coordinates stay `f64` end to end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GazePoint {
    pub x: f64,
    pub y: f64,
}

impl GazePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to an integer cursor position.
    ///
    /// Squared on purpose: callers compare against squared thresholds and
    /// never need the root.
    pub fn distance_sq_to(&self, cursor_x: i32, cursor_y: i32) -> f64 {
        let dx = self.x - cursor_x as f64;
        let dy = self.y - cursor_y as f64;
        dx * dx + dy * dy
    }
}

/// A wire-level fixation event.
///
/// `timestamp_ms` is relative: only differences between events of the same
/// session carry meaning. The `kind` field is the raw device code; decoding
/// happens in the tracker so contract violations surface as errors there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixationEvent {
    /// Raw event-kind code (see `KIND_BEGIN` / `KIND_DATA` / `KIND_END`).
    pub kind: u8,
    /// Fixation point X in screen pixels.
    pub x: f64,
    /// Fixation point Y in screen pixels.
    pub y: f64,
    /// Relative timestamp in milliseconds.
    pub timestamp_ms: f64,
}

impl FixationEvent {
    /// Create a fixation-begin event.
    pub fn begin(x: f64, y: f64, timestamp_ms: f64) -> Self {
        Self {
            kind: KIND_BEGIN,
            x,
            y,
            timestamp_ms,
        }
    }

    /// Create an in-fixation data sample.
    pub fn data(x: f64, y: f64, timestamp_ms: f64) -> Self {
        Self {
            kind: KIND_DATA,
            x,
            y,
            timestamp_ms,
        }
    }

    /// Create a fixation-end event.
    pub fn end(x: f64, y: f64, timestamp_ms: f64) -> Self {
        Self {
            kind: KIND_END,
            x,
            y,
            timestamp_ms,
        }
    }

    /// The fixation point carried by this event.
    pub fn point(&self) -> GazePoint {
        GazePoint::new(self.x, self.y)
    }
}
