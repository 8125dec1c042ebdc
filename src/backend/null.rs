// src/backend/null.rs

//! Backend for builds without X11 support.

use log::debug;

use super::{native, DisplayBackend};
use crate::error::{DisplayError, Operation, Result};
use crate::geometry::{Dpi, ScreenSize};

/// Refuses every X11 operation and answers screen size from the native OS API.
///
/// Holds no state, so a refused setter cannot have side effects.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBackend;

impl NullBackend {
    pub fn new() -> Self {
        NullBackend
    }
}

impl DisplayBackend for NullBackend {
    fn name(&self) -> &'static str {
        "null"
    }

    fn screen_size(&mut self) -> Result<ScreenSize> {
        native::main_display_size()
    }

    fn set_display_name(&mut self, name: &str) -> Result<()> {
        debug!("NullBackend: refusing SetXDisplayName({:?})", name);
        Err(DisplayError::unsupported(Operation::SetXDisplayName))
    }

    fn display_name(&mut self) -> Result<String> {
        Err(DisplayError::unsupported(Operation::GetXDisplayName))
    }

    fn dpi(&mut self) -> Result<Dpi> {
        Err(DisplayError::unsupported(Operation::GetDpi))
    }
}
