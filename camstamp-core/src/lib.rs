//! Board-agnostic caption pipeline for camstamp capture nodes
//!
//! This crate contains the application logic between "frame captured" and
//! "frame handed to the encoder" that does not depend on specific
//! hardware:
//!
//! - Configuration types and TOML loading
//! - Capture timestamps (Unix time to local calendar fields)
//! - Caption text formatting
//! - Wake schedule and its persisted state
//! - Frame annotation
//!
//! Network bring-up, time sync, the camera driver, JPEG encoding and
//! publishing are the firmware's job.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod annotate;
pub mod caption;
pub mod config;
pub mod schedule;
pub mod time;

pub use annotate::{annotate_capture, annotate_frame, AnnotateError};
pub use caption::{format_caption, Caption};
pub use config::{parse_config, CamstampConfig, ConfigError};
pub use schedule::{WakeAction, WakeState};
pub use time::CaptureTime;
