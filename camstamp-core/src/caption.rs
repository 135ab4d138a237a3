//! Caption text
//!
//! Format: `YYYY/MM/DD(Www) HH:MM:SS seq: NNN cd: NN`, for example
//! `2024/03/15(Fri) 12:34:56 seq: 001 cd: 19`.

use core::fmt::Write;

use heapless::String;

use crate::time::CaptureTime;

/// Maximum caption length in bytes
pub const CAPTION_CAPACITY: usize = 92;

/// Bounded caption string
pub type Caption = String<CAPTION_CAPACITY>;

/// Format the caption for a capture
///
/// `seq` is zero-padded to three digits and `countdown` to two; wider
/// values print in full.
pub fn format_caption(
    time: &CaptureTime,
    seq: u32,
    countdown: u8,
) -> Result<Caption, core::fmt::Error> {
    let mut caption = Caption::new();
    write!(
        caption,
        "{:04}/{:02}/{:02}({}) {:02}:{:02}:{:02} seq: {:03} cd: {:02}",
        time.year,
        time.month,
        time.day,
        time.weekday,
        time.hour,
        time.minute,
        time.second,
        seq,
        countdown
    )?;
    Ok(caption)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Weekday;

    fn noon() -> CaptureTime {
        CaptureTime {
            year: 2024,
            month: 3,
            day: 15,
            weekday: Weekday::Fri,
            hour: 12,
            minute: 34,
            second: 56,
        }
    }

    #[test]
    fn test_caption_format() {
        let caption = format_caption(&noon(), 1, 19).unwrap();
        assert_eq!(caption.as_str(), "2024/03/15(Fri) 12:34:56 seq: 001 cd: 19");
    }

    #[test]
    fn test_zero_padding() {
        let time = CaptureTime {
            month: 1,
            day: 2,
            hour: 3,
            minute: 4,
            second: 5,
            ..noon()
        };
        let caption = format_caption(&time, 7, 0).unwrap();
        assert_eq!(caption.as_str(), "2024/01/02(Fri) 03:04:05 seq: 007 cd: 00");
    }

    #[test]
    fn test_wide_values_print_in_full() {
        let caption = format_caption(&noon(), 12345, 255).unwrap();
        assert!(caption.ends_with("seq: 12345 cd: 255"));
    }

    #[test]
    fn test_caption_is_ascii() {
        let caption = format_caption(&noon(), u32::MAX, u8::MAX).unwrap();
        assert!(caption.is_ascii());
        assert!(caption.len() <= CAPTION_CAPACITY);
    }
}
