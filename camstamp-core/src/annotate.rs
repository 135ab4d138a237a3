//! Frame annotation
//!
//! Stamps the capture caption onto a raw grayscale frame before it is
//! handed on for compression.

use camstamp_raster::{DrawReport, GrayFrame, RasterError, Rasterizer};

use crate::caption::format_caption;
use crate::config::{CamstampConfig, CaptionConfig};
use crate::time::CaptureTime;

/// Annotation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnnotateError {
    /// Frame buffer does not match the configured geometry
    Frame(RasterError),
    /// Caption did not fit its buffer
    CaptionOverflow,
}

impl From<RasterError> for AnnotateError {
    fn from(e: RasterError) -> Self {
        AnnotateError::Frame(e)
    }
}

impl core::fmt::Display for AnnotateError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Frame(e) => write!(f, "cannot annotate frame: {e}"),
            Self::CaptionOverflow => write!(f, "caption too long"),
        }
    }
}

/// Stamp `caption` onto `buf` at the configured position
pub fn annotate_frame(
    buf: &mut [u8],
    config: &CaptionConfig,
    caption: &str,
) -> Result<DrawReport, AnnotateError> {
    let mut frame = GrayFrame::new(
        buf,
        usize::from(config.frame_width),
        usize::from(config.frame_height),
    )?;

    let raster = Rasterizer::new(config.font.table());
    let report = raster.draw_string_with_border(
        &mut frame,
        config.x,
        config.y,
        caption,
        config.thickness,
    );

    #[cfg(feature = "defmt")]
    {
        defmt::debug!(
            "Caption '{=str}' at ({}, {}): {} px",
            caption,
            config.x,
            config.y,
            report.pixels_written
        );
        if !report.is_clean() {
            defmt::warn!("Caption not drawn in full: {}", report);
        }
    }

    Ok(report)
}

/// Format the caption for a capture and stamp it onto `buf`
///
/// `unix_s` is the synced wall-clock time of the capture; it is shifted
/// by the configured UTC offset before formatting.
pub fn annotate_capture(
    buf: &mut [u8],
    config: &CamstampConfig,
    unix_s: i64,
    seq: u32,
    countdown: u8,
) -> Result<DrawReport, AnnotateError> {
    let time = CaptureTime::from_unix(unix_s, config.schedule.utc_offset_minutes);
    let caption =
        format_caption(&time, seq, countdown).map_err(|_| AnnotateError::CaptionOverflow)?;
    annotate_frame(buf, &config.caption, &caption)
}
