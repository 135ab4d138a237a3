//! Wake schedule
//!
//! The node deep-sleeps for a fixed interval and wakes up repeatedly, but
//! only captures once a day. The state carried across deep sleep is a
//! sequence number and a countdown of wakes left to skip.

use serde::{Deserialize, Serialize};

/// Magic number to identify a valid wake state record
pub const WAKE_STATE_MAGIC: u32 = 0x5741_4B45; // "WAKE"

/// Current wake state record version
pub const WAKE_STATE_VERSION: u8 = 1;

/// Largest encoded record
pub const MAX_WAKE_STATE_SIZE: usize = 32;

/// Number of hourly wakes to skip after capturing at local `hour` so the
/// next capture happens at `resume_hour` the following day
pub fn next_countdown(hour: u8, resume_hour: u8) -> u8 {
    23 - hour.min(23) + resume_hour.min(23)
}

/// What to do on this wake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WakeAction {
    /// Go straight back to sleep; `remaining` wakes left to skip
    Sleep { remaining: u8 },
    /// Capture a frame
    Capture,
}

/// Wake state persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StateError {
    /// Postcard serialization failed
    Serialize,
    /// Postcard deserialization failed
    Deserialize,
    /// Magic number mismatch (never written, or overwritten)
    BadMagic,
    /// Record written by a different firmware version
    VersionMismatch,
    /// CRC mismatch
    Corrupted,
}

impl core::fmt::Display for StateError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Serialize => write!(f, "failed to encode wake state"),
            Self::Deserialize => write!(f, "failed to decode wake state"),
            Self::BadMagic => write!(f, "wake state magic mismatch"),
            Self::VersionMismatch => write!(f, "wake state version mismatch"),
            Self::Corrupted => write!(f, "wake state CRC mismatch"),
        }
    }
}

/// State retained across deep sleep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WakeState {
    /// Sequence number of the last capture
    pub seq: u32,
    /// Wakes left to skip before the next capture
    pub countdown: u8,
}

impl WakeState {
    /// Decide what to do on this wake
    ///
    /// Consumes one countdown step when sleeping.
    pub fn on_wake(&mut self) -> WakeAction {
        if self.countdown > 0 {
            self.countdown -= 1;
            WakeAction::Sleep {
                remaining: self.countdown,
            }
        } else {
            WakeAction::Capture
        }
    }

    /// Start a capture, returning its sequence number
    pub fn begin_capture(&mut self) -> u32 {
        self.seq = self.seq.wrapping_add(1);
        self.seq
    }

    /// Record a successful capture at local `hour`
    ///
    /// Failed captures must not call this: the countdown stays at zero so
    /// the next wake retries.
    pub fn finish_capture(&mut self, hour: u8, resume_hour: u8) {
        self.countdown = next_countdown(hour, resume_hour);
    }

    /// Encode into `buf`, returning the used part
    pub fn encode<'b>(&self, buf: &'b mut [u8]) -> Result<&'b mut [u8], StateError> {
        let mut record = WakeRecord {
            magic: WAKE_STATE_MAGIC,
            version: WAKE_STATE_VERSION,
            state: *self,
            crc: 0,
        };
        record.crc = record.calculate_crc();
        postcard::to_slice(&record, buf).map_err(|_| StateError::Serialize)
    }

    /// Decode a record written by [`encode`](Self::encode)
    pub fn decode(bytes: &[u8]) -> Result<Self, StateError> {
        let record: WakeRecord =
            postcard::from_bytes(bytes).map_err(|_| StateError::Deserialize)?;

        if record.magic != WAKE_STATE_MAGIC {
            return Err(StateError::BadMagic);
        }
        if record.version != WAKE_STATE_VERSION {
            return Err(StateError::VersionMismatch);
        }
        if record.crc != record.calculate_crc() {
            return Err(StateError::Corrupted);
        }
        Ok(record.state)
    }

    /// Decode a record, falling back to a fresh state
    ///
    /// A fresh state captures on the next wake, which is what a node
    /// should do after a cold boot or a firmware update.
    pub fn restore(bytes: &[u8]) -> Self {
        match Self::decode(bytes) {
            Ok(state) => state,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Wake state invalid ({}), starting fresh", _e);
                Self::default()
            }
        }
    }
}

/// Wake state with a header for data validation
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct WakeRecord {
    /// Magic number for validation
    magic: u32,
    /// Data format version
    version: u8,
    state: WakeState,
    /// CRC32 over magic..state
    crc: u32,
}

impl WakeRecord {
    fn calculate_crc(&self) -> u32 {
        let mut crc: u32 = 0xFFFFFFFF;
        crc = crc32_update(crc, &self.magic.to_le_bytes());
        crc = crc32_update(crc, &[self.version]);
        crc = crc32_update(crc, &self.state.seq.to_le_bytes());
        crc = crc32_update(crc, &[self.state.countdown]);
        !crc
    }
}

/// CRC32 update (IEEE 802.3 polynomial)
fn crc32_update(crc: u32, data: &[u8]) -> u32 {
    const POLY: u32 = 0xEDB88320;
    let mut crc = crc;

    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ POLY;
            } else {
                crc >>= 1;
            }
        }
    }

    crc
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_next_countdown() {
        // Capture at 08:00 skips 23 wakes, next capture 08:00 tomorrow
        assert_eq!(next_countdown(8, 8), 23);
        assert_eq!(next_countdown(23, 8), 8);
        assert_eq!(next_countdown(0, 8), 31);
        // Out-of-range hours are clamped
        assert_eq!(next_countdown(99, 8), 8);
    }

    #[test]
    fn test_wake_cycle() {
        let mut state = WakeState::default();
        assert_eq!(state.on_wake(), WakeAction::Capture);
        assert_eq!(state.begin_capture(), 1);
        state.finish_capture(22, 8);
        assert_eq!(state.countdown, 9);

        for remaining in (0..9).rev() {
            assert_eq!(state.on_wake(), WakeAction::Sleep { remaining });
        }
        assert_eq!(state.on_wake(), WakeAction::Capture);
        assert_eq!(state.begin_capture(), 2);
    }

    #[test]
    fn test_failed_capture_retries() {
        let mut state = WakeState::default();
        assert_eq!(state.on_wake(), WakeAction::Capture);
        state.begin_capture();
        // No finish_capture: upload failed
        assert_eq!(state.on_wake(), WakeAction::Capture);
        assert_eq!(state.begin_capture(), 2);
    }

    #[test]
    fn test_encode_decode() {
        let state = WakeState {
            seq: 417,
            countdown: 12,
        };
        let mut buf = [0u8; MAX_WAKE_STATE_SIZE];
        let len = state.encode(&mut buf).unwrap().len();
        assert_eq!(WakeState::decode(&buf[..len]), Ok(state));
    }

    #[test]
    fn test_decode_rejects_bad_magic() {
        let record = WakeRecord {
            magic: 0,
            version: WAKE_STATE_VERSION,
            state: WakeState::default(),
            crc: 0,
        };
        let mut buf = [0u8; MAX_WAKE_STATE_SIZE];
        let bytes = postcard::to_slice(&record, &mut buf).unwrap();
        assert_eq!(WakeState::decode(bytes), Err(StateError::BadMagic));
    }

    #[test]
    fn test_decode_rejects_other_version() {
        let mut record = WakeRecord {
            magic: WAKE_STATE_MAGIC,
            version: WAKE_STATE_VERSION + 1,
            state: WakeState::default(),
            crc: 0,
        };
        record.crc = record.calculate_crc();
        let mut buf = [0u8; MAX_WAKE_STATE_SIZE];
        let bytes = postcard::to_slice(&record, &mut buf).unwrap();
        assert_eq!(WakeState::decode(bytes), Err(StateError::VersionMismatch));
    }

    #[test]
    fn test_decode_rejects_corruption() {
        let mut record = WakeRecord {
            magic: WAKE_STATE_MAGIC,
            version: WAKE_STATE_VERSION,
            state: WakeState {
                seq: 5,
                countdown: 3,
            },
            crc: 0,
        };
        record.crc = record.calculate_crc();
        record.state.countdown = 4;
        let mut buf = [0u8; MAX_WAKE_STATE_SIZE];
        let bytes = postcard::to_slice(&record, &mut buf).unwrap();
        assert_eq!(WakeState::decode(bytes), Err(StateError::Corrupted));
    }

    #[test]
    fn test_restore_falls_back_to_default() {
        assert_eq!(WakeState::restore(&[]), WakeState::default());
        assert_eq!(WakeState::restore(&[0xFF; 8]), WakeState::default());
    }

    proptest! {
        #[test]
        fn prop_next_capture_lands_on_resume_hour(hour in 0u8..24, resume_hour in 0u8..24) {
            let mut state = WakeState::default();
            prop_assert_eq!(state.on_wake(), WakeAction::Capture);
            state.begin_capture();
            state.finish_capture(hour, resume_hour);

            // One wake per hour: count the skipped ones
            let mut wakes = 0u32;
            while let WakeAction::Sleep { .. } = state.on_wake() {
                wakes += 1;
            }
            let capture_hour = (u32::from(hour) + wakes + 1) % 24;
            prop_assert_eq!(capture_hour, u32::from(resume_hour));
            // Never sooner than the next day
            prop_assert!(wakes + 1 > 23 - u32::from(hour));
        }
    }
}
