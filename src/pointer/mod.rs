//! Pointer host capability.
//!
//! The engine never touches the OS directly; it talks to a `PointerHost`
//! that can report the cursor position and read/write the system pointer
//! speed. The Windows implementation maps to the Win32 mouse-speed
//! parameter; every other target gets the simulated in-memory host, which
//! is also what the tests and the demo run against.

pub mod sim;

#[cfg(target_os = "windows")]
pub mod windows;

use crate::engine::policy::PointerSpeed;

/// Errors surfaced by a pointer host.
#[derive(Debug)]
pub enum PointerError {
    /// The cursor position query failed; the current speed decision is
    /// skipped.
    QueryFailed(String),
    /// The speed write failed; best-effort, never fatal.
    SetFailed(String),
}

impl std::fmt::Display for PointerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PointerError::QueryFailed(e) => write!(f, "Cursor position query failed: {e}"),
            PointerError::SetFailed(e) => write!(f, "Pointer speed set failed: {e}"),
        }
    }
}

impl std::error::Error for PointerError {}

/// Host capability the speed controller depends on.
pub trait PointerHost {
    /// Current cursor position in screen pixel coordinates.
    fn cursor_position(&mut self) -> Result<(i32, i32), PointerError>;

    /// Current system pointer speed.
    fn pointer_speed(&mut self) -> Result<PointerSpeed, PointerError>;

    /// Set the system pointer speed. Writes are absolute and idempotent.
    fn apply_speed(&mut self, speed: PointerSpeed) -> Result<(), PointerError>;
}

// Re-export commonly used types
pub use sim::SimulatedPointerHost;

#[cfg(target_os = "windows")]
pub use windows::WindowsPointerHost;

/// Platform-default pointer host.
#[cfg(target_os = "windows")]
pub type Host = WindowsPointerHost;

/// Platform-default pointer host.
#[cfg(not(target_os = "windows"))]
pub type Host = SimulatedPointerHost;
