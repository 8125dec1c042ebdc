//! # display-shim
//!
//! Queries the primary display's pixel size and, on X11 builds, gets or sets
//! the X display that subsequent queries target.
//!
//! ```no_run
//! use display_shim::DisplayContext;
//!
//! let ctx = DisplayContext::new()?;
//! let size = ctx.get_screen_size()?;
//! println!("primary display: {size}");
//!
//! match ctx.get_x_display_name() {
//!     Ok(name) => println!("X display: {name}"),
//!     Err(e) => println!("{e}"),
//! }
//! # Ok::<(), display_shim::DisplayError>(())
//! ```

pub mod backend;
pub mod config;
pub mod context;
pub mod error;
pub mod geometry;

pub use backend::{DisplayBackend, NullBackend, X11Backend};
pub use config::{BackendKind, Config, X11Config, CONFIG};
pub use context::DisplayContext;
pub use error::{DisplayError, Operation, Result};
pub use geometry::{Dpi, ScreenMetrics, ScreenSize};
