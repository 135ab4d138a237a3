//! Capture timestamps
//!
//! Converts a synced Unix time into local calendar fields for the caption.
//! The node keeps a fixed UTC offset; there is no DST handling.

use core::fmt;

/// Day of the week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Weekday {
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl Weekday {
    const ALL: [Weekday; 7] = [
        Weekday::Sun,
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ];

    /// Three-letter English abbreviation
    pub const fn abbrev(self) -> &'static str {
        match self {
            Weekday::Sun => "Sun",
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
        }
    }

    /// Weekday of a day count relative to 1970-01-01 (a Thursday)
    fn from_days(days: i64) -> Self {
        Self::ALL[(days + 4).rem_euclid(7) as usize]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

/// Local wall-clock time of a capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CaptureTime {
    pub year: i32,
    /// 1-12
    pub month: u8,
    /// 1-31
    pub day: u8,
    pub weekday: Weekday,
    /// 0-23
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl CaptureTime {
    /// Build local time from Unix seconds and a UTC offset
    pub fn from_unix(unix_s: i64, utc_offset_minutes: i16) -> Self {
        let local = unix_s.saturating_add(i64::from(utc_offset_minutes) * 60);
        let days = local.div_euclid(86_400);
        let secs = local.rem_euclid(86_400);
        let (year, month, day) = civil_from_days(days);

        Self {
            year,
            month,
            day,
            weekday: Weekday::from_days(days),
            hour: (secs / 3600) as u8,
            minute: (secs % 3600 / 60) as u8,
            second: (secs % 60) as u8,
        }
    }
}

/// Proleptic Gregorian date for a day count relative to 1970-01-01
///
/// Eras are 400-year cycles starting on March 1st so the leap day falls at
/// the end of the year.
fn civil_from_days(days: i64) -> (i32, u8, u8) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let year = yoe + era * 400 + i64::from(month <= 2);

    (year.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch() {
        let t = CaptureTime::from_unix(0, 0);
        assert_eq!((t.year, t.month, t.day), (1970, 1, 1));
        assert_eq!((t.hour, t.minute, t.second), (0, 0, 0));
        assert_eq!(t.weekday, Weekday::Thu);
    }

    #[test]
    fn test_known_timestamp() {
        // 2024-03-15 03:34:56 UTC
        let t = CaptureTime::from_unix(1_710_473_696, 0);
        assert_eq!((t.year, t.month, t.day), (2024, 3, 15));
        assert_eq!((t.hour, t.minute, t.second), (3, 34, 56));
        assert_eq!(t.weekday, Weekday::Fri);
    }

    #[test]
    fn test_utc_offset_crosses_midnight() {
        // 2024-03-15 20:00:00 UTC is 2024-03-16 05:00:00 at UTC+9
        let t = CaptureTime::from_unix(1_710_532_800, 9 * 60);
        assert_eq!((t.year, t.month, t.day), (2024, 3, 16));
        assert_eq!(t.hour, 5);
        assert_eq!(t.weekday, Weekday::Sat);
    }

    #[test]
    fn test_negative_offset_and_leap_day() {
        // 2024-03-01 02:00:00 UTC is 2024-02-29 21:00:00 at UTC-5
        let t = CaptureTime::from_unix(1_709_258_400, -5 * 60);
        assert_eq!((t.year, t.month, t.day), (2024, 2, 29));
        assert_eq!(t.hour, 21);
        assert_eq!(t.weekday, Weekday::Thu);
    }

    #[test]
    fn test_before_epoch() {
        // 1969-12-31 23:59:59 UTC
        let t = CaptureTime::from_unix(-1, 0);
        assert_eq!((t.year, t.month, t.day), (1969, 12, 31));
        assert_eq!((t.hour, t.minute, t.second), (23, 59, 59));
        assert_eq!(t.weekday, Weekday::Wed);
    }

    #[test]
    fn test_century_non_leap_year() {
        // 2100-03-01 00:00:00 UTC; 2100 has no Feb 29
        let t = CaptureTime::from_unix(4_107_542_400, 0);
        assert_eq!((t.year, t.month, t.day), (2100, 3, 1));
        assert_eq!(t.weekday, Weekday::Mon);
    }
}
