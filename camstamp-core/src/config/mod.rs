//! Configuration types
//!
//! Board-agnostic configuration structures, loaded from TOML.

pub mod toml;
pub mod types;

pub use self::toml::parse_config;
pub use types::*;
