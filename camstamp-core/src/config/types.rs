//! Configuration type definitions
//!
//! These types describe where and how the caption is stamped, and when the
//! node wakes up to capture. Defaults match a VGA camera stamping its
//! caption in the top-left corner once a day at 08:00 UTC+9.

use camstamp_font::{FontTable, ROUND_16X24, SMALL_8X12};
use serde::{Deserialize, Serialize};

/// Default capture width (VGA)
pub const DEFAULT_FRAME_WIDTH: u16 = 640;

/// Default capture height (VGA)
pub const DEFAULT_FRAME_HEIGHT: u16 = 480;

/// Default caption inset from the top-left corner
pub const DEFAULT_CAPTION_INSET: i32 = 8;

/// Largest UTC offset accepted, in minutes (UTC+14)
pub const MAX_UTC_OFFSET_MINUTES: u16 = 14 * 60;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// TOML syntax error, wrong value type or unknown key
    TomlParse,
    /// Frame width or height is zero
    InvalidFrameSize,
    /// Caption origin lies outside the frame
    OriginOutsideFrame,
    /// Resume hour is not 0-23
    InvalidResumeHour(u8),
    /// Wake interval is zero
    InvalidWakeInterval,
    /// UTC offset beyond +/-14 hours
    InvalidUtcOffset(i16),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TomlParse => write!(f, "invalid TOML configuration"),
            Self::InvalidFrameSize => write!(f, "frame dimensions must be non-zero"),
            Self::OriginOutsideFrame => write!(f, "caption origin is outside the frame"),
            Self::InvalidResumeHour(hour) => write!(f, "resume hour {hour} is not 0-23"),
            Self::InvalidWakeInterval => write!(f, "wake interval must be non-zero"),
            Self::InvalidUtcOffset(minutes) => {
                write!(f, "UTC offset of {minutes} minutes is out of range")
            }
        }
    }
}

/// Caption font selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontChoice {
    /// 16x24 rounded font
    #[default]
    #[serde(rename = "round-16x24")]
    Round16x24,
    /// 8x12 compact font
    #[serde(rename = "small-8x12")]
    Small8x12,
}

impl FontChoice {
    /// Get the compiled-in table for this font
    pub fn table(self) -> &'static FontTable<'static> {
        match self {
            Self::Round16x24 => &ROUND_16X24,
            Self::Small8x12 => &SMALL_8X12,
        }
    }
}

/// Caption placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default, deny_unknown_fields)]
pub struct CaptionConfig {
    /// Frame width in pixels
    pub frame_width: u16,
    /// Frame height in pixels
    pub frame_height: u16,
    /// Caption left edge
    pub x: i32,
    /// Caption top edge
    pub y: i32,
    /// Halo thickness in pixels
    pub thickness: i32,
    /// Caption font
    pub font: FontChoice,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            frame_width: DEFAULT_FRAME_WIDTH,
            frame_height: DEFAULT_FRAME_HEIGHT,
            x: DEFAULT_CAPTION_INSET,
            y: DEFAULT_CAPTION_INSET,
            thickness: 1,
            font: FontChoice::Round16x24,
        }
    }
}

impl CaptionConfig {
    /// Frame buffer size in bytes (one byte per pixel)
    pub fn frame_len(&self) -> usize {
        usize::from(self.frame_width) * usize::from(self.frame_height)
    }

    /// Check the placement against the frame
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_width == 0 || self.frame_height == 0 {
            return Err(ConfigError::InvalidFrameSize);
        }
        let inside_x = (0..i32::from(self.frame_width)).contains(&self.x);
        let inside_y = (0..i32::from(self.frame_height)).contains(&self.y);
        if !inside_x || !inside_y {
            return Err(ConfigError::OriginOutsideFrame);
        }
        Ok(())
    }
}

/// Wake and capture timing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default, deny_unknown_fields)]
pub struct ScheduleConfig {
    /// Local time offset from UTC in minutes
    pub utc_offset_minutes: i16,
    /// Deep sleep length between wakes in seconds
    pub wake_interval_s: u32,
    /// Local hour of the daily capture
    pub resume_hour: u8,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 9 * 60,
            wake_interval_s: 60 * 60,
            resume_hour: 8,
        }
    }
}

impl ScheduleConfig {
    /// Deep sleep length in microseconds
    pub fn wake_interval_us(&self) -> u64 {
        u64::from(self.wake_interval_s) * 1_000_000
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resume_hour > 23 {
            return Err(ConfigError::InvalidResumeHour(self.resume_hour));
        }
        if self.wake_interval_s == 0 {
            return Err(ConfigError::InvalidWakeInterval);
        }
        if self.utc_offset_minutes.unsigned_abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(ConfigError::InvalidUtcOffset(self.utc_offset_minutes));
        }
        Ok(())
    }
}

/// Complete node configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default, deny_unknown_fields)]
pub struct CamstampConfig {
    /// Caption placement
    pub caption: CaptionConfig,
    /// Wake schedule
    pub schedule: ScheduleConfig,
}

impl CamstampConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.caption.validate()?;
        self.schedule.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = CamstampConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.caption.frame_len(), 640 * 480);
        assert_eq!(config.schedule.wake_interval_us(), 3_600_000_000);
    }

    #[test]
    fn test_zero_frame_rejected() {
        let caption = CaptionConfig {
            frame_height: 0,
            ..CaptionConfig::default()
        };
        assert_eq!(caption.validate(), Err(ConfigError::InvalidFrameSize));
    }

    #[test]
    fn test_origin_outside_frame_rejected() {
        for (x, y) in [(-1, 8), (8, -1), (640, 8), (8, 480)] {
            let caption = CaptionConfig {
                x,
                y,
                ..CaptionConfig::default()
            };
            assert_eq!(caption.validate(), Err(ConfigError::OriginOutsideFrame));
        }
    }

    #[test]
    fn test_schedule_limits() {
        let bad_hour = ScheduleConfig {
            resume_hour: 24,
            ..ScheduleConfig::default()
        };
        assert_eq!(bad_hour.validate(), Err(ConfigError::InvalidResumeHour(24)));

        let no_sleep = ScheduleConfig {
            wake_interval_s: 0,
            ..ScheduleConfig::default()
        };
        assert_eq!(no_sleep.validate(), Err(ConfigError::InvalidWakeInterval));

        let far_east = ScheduleConfig {
            utc_offset_minutes: 15 * 60,
            ..ScheduleConfig::default()
        };
        assert_eq!(far_east.validate(), Err(ConfigError::InvalidUtcOffset(900)));

        let far_west = ScheduleConfig {
            utc_offset_minutes: -12 * 60,
            ..ScheduleConfig::default()
        };
        assert!(far_west.validate().is_ok());
    }

    #[test]
    fn test_font_choice_tables() {
        assert_eq!(FontChoice::Round16x24.table().glyph_width(), 16);
        assert_eq!(FontChoice::Small8x12.table().glyph_height(), 12);
    }
}
