//! Stencil text rasterizer for grayscale frames
//!
//! This crate provides:
//! - `GrayCanvas` trait, the single bounds-checked pixel accessor drawing goes through
//! - `GrayFrame`, a `(width, height, stride)` view over a caller-owned buffer
//! - `Rasterizer` for plain and outlined text
//! - Flat `draw_string` / `draw_string_with_border` entry points using the
//!   default font
//!
//! # Outlined text
//!
//! Captions are stamped onto photographs of unknown brightness. The halo
//! mode draws the text four times in black, shifted left, right, up and
//! down, then once in white on top, so it reads on both dark and light
//! backgrounds.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod draw;
pub mod error;
pub mod frame;

// Re-export key types
pub use draw::{DrawReport, OutlineStyle, Rasterizer, BLACK, WHITE};
pub use error::RasterError;
pub use frame::{GrayCanvas, GrayFrame};

/// Draw `text` into a `width * height` buffer with the default font
///
/// Fails only if `buf` is too small for the frame; nothing is written
/// in that case.
pub fn draw_string(
    buf: &mut [u8],
    width: usize,
    height: usize,
    x: i32,
    y: i32,
    text: &str,
    color: u8,
) -> Result<DrawReport, RasterError> {
    let mut frame = GrayFrame::new(buf, width, height)?;
    Ok(Rasterizer::default().draw_string(&mut frame, x, y, text, color))
}

/// Draw `text` with a black halo into a `width * height` buffer with the
/// default font
pub fn draw_string_with_border(
    buf: &mut [u8],
    width: usize,
    height: usize,
    x: i32,
    y: i32,
    text: &str,
    thickness: i32,
) -> Result<DrawReport, RasterError> {
    let mut frame = GrayFrame::new(buf, width, height)?;
    Ok(Rasterizer::default().draw_string_with_border(&mut frame, x, y, text, thickness))
}

#[cfg(test)]
mod tests {
    use super::*;
    use camstamp_font::load;
    use std::collections::HashSet;

    const VGA_W: usize = 640;
    const VGA_H: usize = 480;
    const GRAY: u8 = 128;

    /// Absolute positions of every set pixel of `text` drawn at `(x, y)`
    fn ink(text: &str, x: i64, y: i64) -> HashSet<(i64, i64)> {
        let font = load();
        let mut set = HashSet::new();
        for (index, code) in text.bytes().enumerate() {
            let glyph = font.glyph(code).unwrap();
            for pixel in glyph.set_pixels() {
                set.insert((
                    x + index as i64 * 16 + i64::from(pixel.col),
                    y + i64::from(pixel.row),
                ));
            }
        }
        set
    }

    #[test]
    fn test_caption_scenario_vga() {
        let mut buf = vec![GRAY; VGA_W * VGA_H];
        let report = draw_string_with_border(&mut buf, VGA_W, VGA_H, 8, 8, "seq: 001", 1).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.glyphs_drawn, 5 * 8);

        let white = ink("seq: 001", 8, 8);
        let mut black = HashSet::new();
        for (dx, dy) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            black.extend(ink("seq: 001", 8 + dx, 8 + dy));
        }

        for y in 0..VGA_H {
            for x in 0..VGA_W {
                let at = (x as i64, y as i64);
                let expected = if white.contains(&at) {
                    WHITE
                } else if black.contains(&at) {
                    BLACK
                } else {
                    GRAY
                };
                assert_eq!(buf[y * VGA_W + x], expected, "pixel ({x}, {y})");
            }
        }

        // The halo really shows somewhere around every glyph
        assert!(black.difference(&white).count() > 0);
    }

    #[test]
    fn test_flat_draw_string() {
        let mut buf = vec![0u8; 64 * 32];
        let report = draw_string(&mut buf, 64, 32, 0, 0, "ok", 200).unwrap();
        assert_eq!(report.glyphs_drawn, 2);
        assert_eq!(buf.iter().filter(|&&b| b == 200).count(), report.pixels_written);
    }

    #[test]
    fn test_flat_entry_rejects_short_buffer() {
        let mut buf = vec![GRAY; 100];
        let err = draw_string_with_border(&mut buf, VGA_W, VGA_H, 8, 8, "x", 1).unwrap_err();
        assert_eq!(
            err,
            RasterError::BufferTooSmall {
                needed: VGA_W * VGA_H,
                actual: 100
            }
        );
        assert!(buf.iter().all(|&b| b == GRAY));
    }
}
