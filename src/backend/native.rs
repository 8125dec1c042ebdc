// src/backend/native.rs

//! Main-display metrics from the OS itself, for builds without X11.

use log::debug;

use crate::error::Result;
use crate::geometry::ScreenSize;

#[cfg(target_os = "macos")]
mod platform {
    use crate::error::Result;
    use crate::geometry::ScreenSize;

    #[link(name = "CoreGraphics", kind = "framework")]
    extern "C" {
        fn CGMainDisplayID() -> u32;
        fn CGDisplayPixelsWide(display: u32) -> usize;
        fn CGDisplayPixelsHigh(display: u32) -> usize;
    }

    pub fn main_display_size() -> Result<ScreenSize> {
        // SAFETY: CoreGraphics display queries take no pointers and are thread-safe.
        let (width, height) = unsafe {
            let display_id = CGMainDisplayID();
            (CGDisplayPixelsWide(display_id), CGDisplayPixelsHigh(display_id))
        };
        ScreenSize::from_raw(
            i64::try_from(width).unwrap_or(i64::MAX),
            i64::try_from(height).unwrap_or(i64::MAX),
        )
    }
}

#[cfg(windows)]
mod platform {
    use windows_sys::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};

    use crate::error::Result;
    use crate::geometry::ScreenSize;

    pub fn main_display_size() -> Result<ScreenSize> {
        // SAFETY: GetSystemMetrics has no preconditions.
        let (width, height) = unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };
        ScreenSize::from_raw(width, height)
    }
}

#[cfg(not(any(target_os = "macos", windows)))]
mod platform {
    use crate::error::{DisplayError, Operation, Result};
    use crate::geometry::ScreenSize;

    pub fn main_display_size() -> Result<ScreenSize> {
        Err(DisplayError::unsupported(Operation::GetScreenSize))
    }
}

/// Pixel size of the OS-designated main display.
pub fn main_display_size() -> Result<ScreenSize> {
    let size = platform::main_display_size()?;
    debug!("Native main display size: {}", size);
    Ok(size)
}

/// Whether [`main_display_size`] can succeed on this target at all.
pub const fn has_native_metrics() -> bool {
    cfg!(any(target_os = "macos", windows))
}
