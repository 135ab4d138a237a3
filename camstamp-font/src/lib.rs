//! Monospace bitmap fonts for caption rendering
//!
//! This crate provides:
//! - `FontTable`, an immutable glyph atlas with fixed-size, bit-packed glyphs
//! - `Glyph` and its pixel iterators, decoupling the packing layout from drawing
//! - The built-in fonts, validated at compile time
//!
//! # Blob layout
//!
//! ```text
//! ┌───────┬────────┬────────────┬─────────────┬──────────────────────┐
//! │ WIDTH │ HEIGHT │ FIRST CODE │ GLYPH COUNT │ PACKED GLYPH BYTES   │
//! │ 1B    │ 1B     │ 1B         │ 1B          │ count*ceil(w/8)*h B  │
//! └───────┴────────┴────────────┴─────────────┴──────────────────────┘
//! ```
//!
//! Glyph rows are row-major; bit 7 of the first byte of a row is the
//! leftmost pixel.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

mod data;
pub mod glyph;
pub mod table;

// Re-export key types
pub use glyph::{Glyph, GlyphPixel, GlyphPixels, GlyphRow, GlyphRows};
pub use table::{load, FontTable, HEADER_LEN, ROUND_16X24, SMALL_8X12};
