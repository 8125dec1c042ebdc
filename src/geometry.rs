// src/geometry.rs

//! Value types for display measurements and the DPI to scale-percentage math.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DisplayError, Result};

/// Reference DPI of an unscaled (100 %) desktop.
pub const BASE_DPI: u32 = 96;

const MM_PER_INCH: f64 = 25.4;

/// Pixel size of the primary display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: i32,
    pub height: i32,
}

impl ScreenSize {
    /// Builds a size from whatever integer type the platform API returned.
    ///
    /// Negative or out-of-range components are rejected.
    pub fn from_raw<W, H>(width: W, height: H) -> Result<Self>
    where
        W: Into<i64>,
        H: Into<i64>,
    {
        let (w, h) = (width.into(), height.into());
        match (i32::try_from(w), i32::try_from(h)) {
            (Ok(width), Ok(height)) if width >= 0 && height >= 0 => Ok(Self { width, height }),
            _ => Err(DisplayError::InvalidScreenSize {
                width: w,
                height: h,
            }),
        }
    }

    /// Multiplies both components by `percent / 100`, truncating.
    ///
    /// Fails with `ScaleOverflow` when a component no longer fits an `i32`.
    pub fn scaled(self, percent: u32) -> Result<Self> {
        Ok(Self {
            width: scale_by_percent(self.width, percent)?,
            height: scale_by_percent(self.height, percent)?,
        })
    }
}

impl fmt::Display for ScreenSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Raw measurements of one X screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenMetrics {
    pub width_px: i32,
    pub height_px: i32,
    /// May be 0 when the server does not know the physical size.
    pub width_mm: i32,
    pub height_mm: i32,
}

impl ScreenMetrics {
    pub fn size(&self) -> Result<ScreenSize> {
        ScreenSize::from_raw(self.width_px, self.height_px)
    }

    pub fn dpi(&self) -> Dpi {
        Dpi {
            x: dots_per_inch(self.width_px, self.width_mm),
            y: dots_per_inch(self.height_px, self.height_mm),
        }
    }
}

/// Dots per inch along each axis. 0 means unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dpi {
    pub x: u32,
    pub y: u32,
}

impl Dpi {
    /// Desktop scale percentage for the horizontal DPI.
    pub fn scale_percent(&self) -> u32 {
        scale_percent(self.x)
    }
}

fn dots_per_inch(px: i32, mm: i32) -> u32 {
    if px <= 0 || mm <= 0 {
        return 0;
    }
    let dpi = f64::from(px) * MM_PER_INCH / f64::from(mm);
    (dpi + 0.5) as u32
}

/// Maps a DPI to a scale percentage: 96 -> 100, 120 -> 125, 144 -> 150 and so on.
///
/// An unknown DPI (0) is treated as unscaled.
pub fn scale_percent(dpi: u32) -> u32 {
    if dpi == 0 {
        100
    } else {
        let percent = u64::from(dpi) * 100 / u64::from(BASE_DPI);
        u32::try_from(percent).unwrap_or(u32::MAX)
    }
}

/// `value * percent / 100`, truncating toward zero.
///
/// The product is computed in 64 bits; a result outside `i32` is an error,
/// never a wrapped value.
pub fn scale_by_percent(value: i32, percent: u32) -> Result<i32> {
    let scaled = i64::from(value) * i64::from(percent) / 100;
    i32::try_from(scaled).map_err(|_| DisplayError::ScaleOverflow { value, percent })
}
