// src/context.rs

//! `DisplayContext`: the caller-owned handle every display query goes through.
//!
//! The context owns one backend behind a mutex, so the X display target is
//! explicit state of the context rather than a process global, and concurrent
//! setters are serialized.

use std::sync::{Mutex, MutexGuard};

use log::{debug, warn};

use crate::backend::{self, DisplayBackend};
use crate::config::Config;
use crate::error::Result;
use crate::geometry::{scale_by_percent, Dpi, ScreenSize};

pub struct DisplayContext {
    backend_name: &'static str,
    backend: Mutex<Box<dyn DisplayBackend + Send>>,
}

impl DisplayContext {
    /// Creates a context from the global configuration.
    ///
    /// Fails with `DisplayError::Config` when the environment or config file is invalid.
    pub fn new() -> Result<Self> {
        Self::with_config(Config::global()?)
    }

    pub fn with_config(config: &Config) -> Result<Self> {
        Ok(Self::with_backend(backend::from_config(config)?))
    }

    /// Wraps an already constructed backend, e.g. an `X11Backend<MockXAdapter>`.
    pub fn with_backend(backend: Box<dyn DisplayBackend + Send>) -> Self {
        DisplayContext {
            backend_name: backend.name(),
            backend: Mutex::new(backend),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend_name
    }

    /// Pixel size of the primary display.
    pub fn get_screen_size(&self) -> Result<ScreenSize> {
        let size = self.lock().screen_size()?;
        debug!("Screen size: {}", size);
        Ok(size)
    }

    /// Directs subsequent X11 queries of this context to `name`.
    pub fn set_x_display_name(&self, name: &str) -> Result<()> {
        self.lock().set_display_name(name)
    }

    /// Name of the X display this context targets.
    pub fn get_x_display_name(&self) -> Result<String> {
        self.lock().display_name()
    }

    pub fn dpi(&self) -> Result<Dpi> {
        self.lock().dpi()
    }

    /// Desktop scale percentage derived from the horizontal DPI.
    pub fn scale_percent(&self) -> Result<u32> {
        Ok(self.dpi()?.scale_percent())
    }

    /// `x` multiplied by the desktop scale.
    pub fn scale_value(&self, x: i32) -> Result<i32> {
        scale_by_percent(x, self.scale_percent()?)
    }

    /// Screen size multiplied by the desktop scale.
    pub fn scaled_screen_size(&self) -> Result<ScreenSize> {
        let mut backend = self.lock();
        let size = backend.screen_size()?;
        let percent = backend.dpi()?.scale_percent();
        size.scaled(percent)
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn DisplayBackend + Send>> {
        self.backend.lock().unwrap_or_else(|poisoned| {
            warn!("Display backend mutex was poisoned; recovering");
            poisoned.into_inner()
        })
    }
}

impl std::fmt::Debug for DisplayContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayContext")
            .field("backend", &self.backend_name)
            .finish()
    }
}
