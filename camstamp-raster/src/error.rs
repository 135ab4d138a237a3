//! Raster errors

use core::fmt;

/// Errors that can occur while drawing into a frame
///
/// Only `BufferTooSmall` and `InvalidStride` are returned to callers. The
/// rest are absorbed by the draw loop: the offending glyph or pixel is
/// skipped, counted in the [`DrawReport`](crate::DrawReport), and drawing
/// continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RasterError {
    /// No font loaded
    FontUnavailable,
    /// Character code has no glyph in the font
    CharacterOutOfRange(u8),
    /// Pixel falls outside the frame
    CoordinateOutOfBounds {
        /// Column of the rejected pixel
        x: i64,
        /// Row of the rejected pixel
        y: i64,
    },
    /// Buffer shorter than the frame it claims to hold
    BufferTooSmall {
        /// Bytes required by the frame geometry
        needed: usize,
        /// Bytes supplied
        actual: usize,
    },
    /// Row stride narrower than the frame width
    InvalidStride {
        /// Frame width in pixels
        width: usize,
        /// Supplied stride in bytes
        stride: usize,
    },
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FontUnavailable => write!(f, "no font loaded"),
            Self::CharacterOutOfRange(code) => {
                write!(f, "character {code:#04x} has no glyph")
            }
            Self::CoordinateOutOfBounds { x, y } => {
                write!(f, "pixel ({x}, {y}) is outside the frame")
            }
            Self::BufferTooSmall { needed, actual } => write!(
                f,
                "buffer too small: frame needs {needed} bytes but got {actual} bytes"
            ),
            Self::InvalidStride { width, stride } => {
                write!(f, "stride {stride} is narrower than width {width}")
            }
        }
    }
}

impl core::error::Error for RasterError {}
