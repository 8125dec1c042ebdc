// src/backend/xserver/adapter.rs

//! Defines the `XAdapter` trait, the seam between `X11Backend` and Xlib.
//!
//! `LiveXAdapter` calls libX11; `MockXAdapter` simulates a set of X servers in
//! memory so the backend can be tested without a live X server.

use crate::error::Result;
use crate::geometry::ScreenMetrics;

/// The handful of Xlib calls the display backend needs.
pub trait XAdapter {
    /// An open display connection. Dropping it closes the connection.
    type Connection;

    /// Opens a connection to `name`, or to the default display when `None`.
    ///
    /// Fails with `InvalidDisplayName` for names the C API cannot carry and
    /// with `OpenDisplayFailed` when the server is unreachable.
    fn open_display(&self, name: Option<&str>) -> Result<Self::Connection>;

    /// The display a `None` name resolves to (Xlib `XDisplayName(NULL)`),
    /// or `None` when no default display is configured.
    fn default_display_name(&self) -> Option<String>;

    /// The name the server reports for an open connection (`XDisplayString`).
    fn display_string(&self, connection: &Self::Connection) -> Option<String>;

    /// Size of the default screen of `connection`.
    fn screen_metrics(&self, connection: &Self::Connection) -> Result<ScreenMetrics>;
}
