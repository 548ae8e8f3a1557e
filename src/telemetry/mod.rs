//! Session telemetry for the gaze pointer agent.
//!
//! Tracks what the agent did during a session so a run can be inspected
//! afterwards without any raw gaze data being retained.

pub mod log;

// Re-export commonly used types
pub use log::{
    create_shared_log, create_shared_log_with_persistence, SessionLog, SessionStats,
    SharedSessionLog,
};
