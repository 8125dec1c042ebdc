// src/backend/xserver/live.rs

use std::ffi::{CStr, CString};
use std::ptr;

use ::x11::xlib;
use libc::c_char;
use log::{debug, info, warn};

use super::adapter::XAdapter;
use crate::error::{DisplayError, Result};
use crate::geometry::ScreenMetrics;

/// Manages an X11 Display connection, ensuring it's closed on drop.
///
/// This struct wraps the raw `*mut xlib::Display` pointer and handles
/// opening and closing it.
#[derive(Debug)]
pub struct ManagedDisplay {
    ptr: *mut xlib::Display,
}

// SAFETY: the pointer is owned exclusively by this value and Xlib calls on it
// are only made through `&self`/`&mut self`, which `DisplayContext` serializes
// behind its mutex.
unsafe impl Send for ManagedDisplay {}

impl ManagedDisplay {
    /// Attempts to open a new connection to the X server.
    ///
    /// Passing `None` lets Xlib use the DISPLAY environment variable.
    fn open(name: Option<&str>) -> Result<Self> {
        let c_name = name
            .map(|n| {
                CString::new(n).map_err(|_| DisplayError::InvalidDisplayName {
                    name: n.to_string(),
                })
            })
            .transpose()?;
        let name_ptr = c_name.as_ref().map_or(ptr::null(), |s| s.as_ptr());

        let display_ptr = unsafe { xlib::XOpenDisplay(name_ptr) };
        if display_ptr.is_null() {
            Err(DisplayError::OpenDisplayFailed {
                name: name.map(str::to_string),
            })
        } else {
            debug!("X display {:?} opened: {:p}", name, display_ptr);
            Ok(Self { ptr: display_ptr })
        }
    }

    /// Returns the raw X11 display pointer.
    #[inline]
    pub fn raw(&self) -> *mut xlib::Display {
        self.ptr
    }
}

impl Drop for ManagedDisplay {
    fn drop(&mut self) {
        if !self.ptr.is_null() {
            info!("Closing X11 display connection: {:p}", self.ptr);
            unsafe {
                let status = xlib::XCloseDisplay(self.ptr);
                if status != 0 {
                    warn!(
                        "XCloseDisplay returned non-zero status: {}. Display may not have closed cleanly.",
                        status
                    );
                }
            }
        }
    }
}

/// Reads a C string owned by Xlib. Empty strings count as absent.
///
/// # Safety
///
/// `raw` must be null or point to a NUL-terminated string that stays valid
/// for the duration of the call.
unsafe fn owned_string(raw: *const c_char) -> Option<String> {
    if raw.is_null() {
        return None;
    }
    let s = CStr::from_ptr(raw).to_string_lossy();
    if s.is_empty() {
        None
    } else {
        Some(s.into_owned())
    }
}

/// An `XAdapter` that calls actual X11 functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveXAdapter;

impl LiveXAdapter {
    pub fn new() -> Self {
        LiveXAdapter
    }
}

impl XAdapter for LiveXAdapter {
    type Connection = ManagedDisplay;

    fn open_display(&self, name: Option<&str>) -> Result<ManagedDisplay> {
        ManagedDisplay::open(name)
    }

    fn default_display_name(&self) -> Option<String> {
        // SAFETY: XDisplayName(NULL) returns a pointer into the environment or a
        // static empty string, and does not need a connection.
        unsafe { owned_string(xlib::XDisplayName(ptr::null())) }
    }

    fn display_string(&self, connection: &ManagedDisplay) -> Option<String> {
        if connection.raw().is_null() {
            return None;
        }
        // SAFETY: the display is open; the returned string lives as long as it.
        unsafe { owned_string(xlib::XDisplayString(connection.raw())) }
    }

    fn screen_metrics(&self, connection: &ManagedDisplay) -> Result<ScreenMetrics> {
        let dpy = connection.raw();
        if dpy.is_null() {
            return Err(DisplayError::OpenDisplayFailed { name: None });
        }
        // SAFETY: `dpy` is a valid, open display for the lifetime of `connection`.
        let metrics = unsafe {
            let screen = xlib::XDefaultScreen(dpy);
            ScreenMetrics {
                width_px: xlib::XDisplayWidth(dpy, screen),
                height_px: xlib::XDisplayHeight(dpy, screen),
                width_mm: xlib::XDisplayWidthMM(dpy, screen),
                height_mm: xlib::XDisplayHeightMM(dpy, screen),
            }
        };
        debug!("X screen metrics: {:?}", metrics);
        Ok(metrics)
    }
}
