// src/backend/mod.rs

//! Display backends.
//!
//! - `X11Backend`: queries an X server through an [`xserver::XAdapter`]
//! - `NullBackend`: builds without X11; screen size comes from the native OS API
//!
//! Which one a build gets is decided by `build.rs` (`cfg(use_x11_backend)`)
//! and then by [`BackendKind`] at startup.

pub mod native;
pub mod null;
pub mod xserver;

use log::{info, warn};

use crate::config::{BackendKind, Config};
use crate::error::{DisplayError, Operation, Result};
use crate::geometry::{Dpi, ScreenSize};

pub use null::NullBackend;
pub use xserver::X11Backend;

/// Platform-specific display queries.
///
/// Methods take `&mut self` because a backend may open its connection lazily.
/// Callers share a backend through `DisplayContext`, which serializes access.
pub trait DisplayBackend {
    /// Short identifier used in logs: `"x11"` or `"null"`.
    fn name(&self) -> &'static str;

    /// Pixel size of the primary display.
    fn screen_size(&mut self) -> Result<ScreenSize>;

    /// Points all subsequent X11 queries at `name`.
    fn set_display_name(&mut self, name: &str) -> Result<()>;

    /// Name of the X display currently targeted, as an owned copy.
    fn display_name(&mut self) -> Result<String>;

    /// DPI of the primary display.
    fn dpi(&mut self) -> Result<Dpi>;
}

/// Creates the backend requested by `config`.
pub fn from_config(config: &Config) -> Result<Box<dyn DisplayBackend + Send>> {
    match config.backend {
        BackendKind::Null => {
            info!("Using null display backend (requested)");
            Ok(Box::new(NullBackend::new()))
        }
        BackendKind::X11 => live_x11(config).unwrap_or_else(|| {
            warn!("X11 backend requested but this build has no X11 support");
            Err(DisplayError::unsupported(Operation::SelectX11Backend))
        }),
        BackendKind::Auto => live_x11(config).unwrap_or_else(|| {
            info!("Using null display backend (X11 not compiled in)");
            Ok(Box::new(NullBackend::new()) as Box<dyn DisplayBackend + Send>)
        }),
    }
}

/// `None` when X11 is not compiled in.
#[cfg(use_x11_backend)]
fn live_x11(config: &Config) -> Option<Result<Box<dyn DisplayBackend + Send>>> {
    info!("Using X11 display backend");
    Some(
        xserver::LiveX11Backend::live(&config.x11)
            .map(|backend| Box::new(backend) as Box<dyn DisplayBackend + Send>),
    )
}

#[cfg(not(use_x11_backend))]
fn live_x11(_config: &Config) -> Option<Result<Box<dyn DisplayBackend + Send>>> {
    None
}

/// Whether this build has the live X11 backend compiled in.
pub const fn x11_compiled_in() -> bool {
    cfg!(use_x11_backend)
}
