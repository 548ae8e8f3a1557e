//! Windows implementation of the pointer host.
//!
//! Uses `GetCursorPos` for the position query and the `SPI_GETMOUSESPEED` /
//! `SPI_SETMOUSESPEED` system parameters for the speed. Speed writes are
//! session-scoped: the update flags are zero, so nothing is persisted to the
//! user profile.

use crate::engine::policy::PointerSpeed;
use crate::pointer::{PointerError, PointerHost};
use std::ffi::c_void;
use windows::Win32::Foundation::POINT;
use windows::Win32::UI::WindowsAndMessaging::{
    GetCursorPos, SystemParametersInfoW, SPI_GETMOUSESPEED, SPI_SETMOUSESPEED,
    SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS,
};

/// Pointer host backed by the Win32 mouse-speed parameter.
#[derive(Debug, Default)]
pub struct WindowsPointerHost;

impl WindowsPointerHost {
    pub fn new() -> Self {
        Self
    }
}

impl PointerHost for WindowsPointerHost {
    fn cursor_position(&mut self) -> Result<(i32, i32), PointerError> {
        let mut point = POINT::default();
        unsafe { GetCursorPos(&mut point) }
            .map_err(|e| PointerError::QueryFailed(e.to_string()))?;
        Ok((point.x, point.y))
    }

    fn pointer_speed(&mut self) -> Result<PointerSpeed, PointerError> {
        let mut raw: u32 = 0;
        unsafe {
            SystemParametersInfoW(
                SPI_GETMOUSESPEED,
                0,
                Some(&mut raw as *mut u32 as *mut c_void),
                SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
            )
        }
        .map_err(|e| PointerError::QueryFailed(e.to_string()))?;
        Ok(PointerSpeed::clamped(raw as i64))
    }

    fn apply_speed(&mut self, speed: PointerSpeed) -> Result<(), PointerError> {
        // SPI_SETMOUSESPEED takes the value in the pointer-sized parameter,
        // not through a buffer.
        let value = speed.get() as usize;
        unsafe {
            SystemParametersInfoW(
                SPI_SETMOUSESPEED,
                0,
                Some(value as *mut c_void),
                SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
            )
        }
        .map_err(|e| PointerError::SetFailed(e.to_string()))
    }
}
