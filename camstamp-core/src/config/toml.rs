//! TOML configuration loading
//!
//! Expected layout, every key optional:
//!
//! ```toml
//! [caption]
//! frame_width = 640
//! frame_height = 480
//! x = 8
//! y = 8
//! thickness = 1
//! font = "round-16x24"   # or "small-8x12"
//!
//! [schedule]
//! utc_offset_minutes = 540
//! wake_interval_s = 3600
//! resume_hour = 8
//! ```
//!
//! Missing keys take their defaults; unknown keys are rejected so typos
//! don't silently fall back.

use super::types::{CamstampConfig, ConfigError};

/// Parse and validate a TOML configuration
pub fn parse_config(input: &str) -> Result<CamstampConfig, ConfigError> {
    let config: CamstampConfig = ::toml::from_str(input).map_err(|_| ConfigError::TomlParse)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FontChoice;

    #[test]
    fn test_empty_input_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), CamstampConfig::default());
    }

    #[test]
    fn test_full_config() {
        let input = r#"
            # Garden camera
            [caption]
            frame_width = 800
            frame_height = 600
            x = 16
            y = 570
            thickness = 2
            font = "small-8x12"

            [schedule]
            utc_offset_minutes = -300
            wake_interval_s = 1800
            resume_hour = 6
        "#;

        let config = parse_config(input).unwrap();
        assert_eq!(config.caption.frame_width, 800);
        assert_eq!(config.caption.frame_height, 600);
        assert_eq!(config.caption.x, 16);
        assert_eq!(config.caption.y, 570);
        assert_eq!(config.caption.thickness, 2);
        assert_eq!(config.caption.font, FontChoice::Small8x12);
        assert_eq!(config.schedule.utc_offset_minutes, -300);
        assert_eq!(config.schedule.wake_interval_s, 1800);
        assert_eq!(config.schedule.resume_hour, 6);
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config = parse_config("[caption]\nthickness = 3\n").unwrap();
        assert_eq!(config.caption.thickness, 3);
        assert_eq!(config.caption.x, 8);
        assert_eq!(config.caption.frame_width, 640);
        assert_eq!(config.schedule.resume_hour, 8);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert_eq!(
            parse_config("[caption]\nthicknes = 3\n"),
            Err(ConfigError::TomlParse)
        );
        assert_eq!(parse_config("[network]\nssid = \"x\"\n"), Err(ConfigError::TomlParse));
    }

    #[test]
    fn test_wrong_type_rejected() {
        assert_eq!(parse_config("[caption]\nx = \"left\"\n"), Err(ConfigError::TomlParse));
        assert_eq!(
            parse_config("[caption]\nfont = \"comic-sans\"\n"),
            Err(ConfigError::TomlParse)
        );
    }

    #[test]
    fn test_validation_applies() {
        assert_eq!(
            parse_config("[schedule]\nresume_hour = 25\n"),
            Err(ConfigError::InvalidResumeHour(25))
        );
        assert_eq!(
            parse_config("[caption]\nx = 700\n"),
            Err(ConfigError::OriginOutsideFrame)
        );
    }
}
