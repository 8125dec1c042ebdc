// src/error.rs

//! Error type shared by every display query.

use std::fmt;

use thiserror::Error;

/// The boundary operations that can be refused on a given build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetScreenSize,
    SetXDisplayName,
    GetXDisplayName,
    GetDpi,
    SelectX11Backend,
}

impl Operation {
    /// Whether the operation needs an X server rather than any native display API.
    pub fn requires_x11(self) -> bool {
        !matches!(self, Operation::GetScreenSize)
    }

    fn requirement(self) -> &'static str {
        if self.requires_x11() {
            "is only supported on Linux"
        } else {
            "is not supported on this platform"
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::GetScreenSize => "GetScreenSize",
            Operation::SetXDisplayName => "SetXDisplayName",
            Operation::GetXDisplayName => "GetXDisplayName",
            Operation::GetDpi => "GetDpi",
            Operation::SelectX11Backend => "SelectX11Backend",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("{operation} {}", .operation.requirement())]
    UnsupportedPlatform { operation: Operation },
    #[error("failed to allocate {requested} bytes for the display name")]
    AllocationFailure { requested: usize },
    #[error("no X display name is set and no default display is configured")]
    NoDisplayName,
    #[error("invalid X display name {name:?}: contains a NUL byte")]
    InvalidDisplayName { name: String },
    #[error("failed to open X display {name:?}. Check DISPLAY environment variable or X server status.")]
    OpenDisplayFailed { name: Option<String> },
    #[error("platform reported an invalid screen size {width}x{height}")]
    InvalidScreenSize { width: i64, height: i64 },
    #[error("scaling {value} by {percent}% does not fit in 32 bits")]
    ScaleOverflow { value: i32, percent: u32 },
    #[error("configuration error: {0}")]
    Config(String),
}

impl DisplayError {
    pub fn unsupported(operation: Operation) -> Self {
        DisplayError::UnsupportedPlatform { operation }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, DisplayError::UnsupportedPlatform { .. })
    }
}

pub type Result<T> = std::result::Result<T, DisplayError>;

/// Copies a display name into a freshly allocated string owned by the caller.
///
/// Allocation failure is reported instead of aborting the process.
pub(crate) fn copy_name(name: &str) -> Result<String> {
    let mut owned = String::new();
    owned
        .try_reserve_exact(name.len())
        .map_err(|_| DisplayError::AllocationFailure {
            requested: name.len(),
        })?;
    owned.push_str(name);
    Ok(owned)
}
