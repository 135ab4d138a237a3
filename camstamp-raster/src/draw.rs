//! Text rasterizer
//!
//! Glyphs are stencils: only set bits write `color`, unset bits leave the
//! frame untouched, so text composites onto the picture instead of
//! stamping a box over it.

use core::ops::AddAssign;

use camstamp_font::FontTable;

use crate::error::RasterError;
use crate::frame::GrayCanvas;

/// Black, used for the outline passes
pub const BLACK: u8 = 0x00;

/// White, used for the center pass
pub const WHITE: u8 = 0xFF;

/// What a draw call did
///
/// Draw calls never fail; skipped glyphs and clipped pixels are counted
/// here instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrawReport {
    /// Glyphs found in the font and stamped (possibly partially)
    pub glyphs_drawn: usize,
    /// Characters with no glyph in the font
    pub glyphs_skipped: usize,
    /// Pixels written to the frame
    pub pixels_written: usize,
    /// Set pixels that fell outside the frame
    pub pixels_clipped: usize,
    /// First problem encountered, if any
    pub first_issue: Option<RasterError>,
}

impl DrawReport {
    /// Check if everything was drawn in full
    pub fn is_clean(&self) -> bool {
        self.first_issue.is_none()
    }

    /// Check if any pixel was clipped at the frame edge
    pub fn is_clipped(&self) -> bool {
        self.pixels_clipped > 0
    }

    fn note(&mut self, issue: RasterError) {
        if self.first_issue.is_none() {
            self.first_issue = Some(issue);
        }
    }
}

impl AddAssign for DrawReport {
    fn add_assign(&mut self, other: Self) {
        self.glyphs_drawn += other.glyphs_drawn;
        self.glyphs_skipped += other.glyphs_skipped;
        self.pixels_written += other.pixels_written;
        self.pixels_clipped += other.pixels_clipped;
        if let Some(issue) = other.first_issue {
            self.note(issue);
        }
    }
}

/// Outline rendering parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutlineStyle {
    /// Offset of the four outline copies in pixels
    pub thickness: i32,
    /// Color of the four offset copies
    pub outline: u8,
    /// Color of the centered copy
    pub fill: u8,
}

impl OutlineStyle {
    /// One pixel black halo around white text
    pub const HALO: Self = Self::halo(1);

    /// Black halo of the given thickness around white text
    pub const fn halo(thickness: i32) -> Self {
        Self {
            thickness,
            outline: BLACK,
            fill: WHITE,
        }
    }
}

impl Default for OutlineStyle {
    fn default() -> Self {
        Self::HALO
    }
}

/// Draws ASCII text with a fixed font
///
/// The font is passed in explicitly; a rasterizer built with
/// [`Rasterizer::unloaded`] draws nothing.
#[derive(Debug, Clone, Copy)]
pub struct Rasterizer<'f> {
    font: Option<&'f FontTable<'f>>,
}

impl<'f> Rasterizer<'f> {
    /// Create a rasterizer using `font`
    pub const fn new(font: &'f FontTable<'f>) -> Self {
        Self { font: Some(font) }
    }

    /// Create a rasterizer with no font
    pub const fn unloaded() -> Self {
        Self { font: None }
    }

    /// Get the font, if any
    pub fn font(&self) -> Option<&'f FontTable<'f>> {
        self.font
    }

    /// Stamp `text` with its top-left corner at `(x, y)`
    ///
    /// Characters advance by the glyph width with no gap. Characters
    /// outside the font are skipped but still take up a cell. Pixels
    /// outside the target are clipped.
    pub fn draw_string<C, T>(
        &self,
        target: &mut C,
        x: i32,
        y: i32,
        text: &T,
        color: u8,
    ) -> DrawReport
    where
        C: GrayCanvas + ?Sized,
        T: AsRef<[u8]> + ?Sized,
    {
        let mut report = DrawReport::default();

        let Some(font) = self.font else {
            report.note(RasterError::FontUnavailable);
            return report;
        };

        let advance = i64::from(font.advance());
        let (x, y) = (i64::from(x), i64::from(y));

        for (index, &code) in text.as_ref().iter().enumerate() {
            let Some(glyph) = font.glyph(code) else {
                report.glyphs_skipped += 1;
                report.note(RasterError::CharacterOutOfRange(code));
                continue;
            };
            report.glyphs_drawn += 1;

            let origin_x = x + index as i64 * advance;
            for pixel in glyph.set_pixels() {
                let px = origin_x + i64::from(pixel.col);
                let py = y + i64::from(pixel.row);
                match target.put_pixel(px, py, color) {
                    Ok(()) => report.pixels_written += 1,
                    Err(issue) => {
                        report.pixels_clipped += 1;
                        report.note(issue);
                    }
                }
            }
        }

        report
    }

    /// Stamp `text` four times offset in `style.outline`, then once
    /// centered in `style.fill`
    ///
    /// Pass order is left, right, up, down, center. The center pass goes
    /// last so it wins wherever the copies overlap.
    pub fn draw_string_outlined<C, T>(
        &self,
        target: &mut C,
        x: i32,
        y: i32,
        text: &T,
        style: OutlineStyle,
    ) -> DrawReport
    where
        C: GrayCanvas + ?Sized,
        T: AsRef<[u8]> + ?Sized,
    {
        let t = style.thickness;
        let passes = [
            (x.saturating_sub(t), y, style.outline),
            (x.saturating_add(t), y, style.outline),
            (x, y.saturating_sub(t), style.outline),
            (x, y.saturating_add(t), style.outline),
            (x, y, style.fill),
        ];

        let mut report = DrawReport::default();
        for (px, py, color) in passes {
            report += self.draw_string(target, px, py, text, color);
        }
        report
    }

    /// Stamp `text` with a black halo of `thickness` pixels around white
    /// glyphs
    pub fn draw_string_with_border<C, T>(
        &self,
        target: &mut C,
        x: i32,
        y: i32,
        text: &T,
        thickness: i32,
    ) -> DrawReport
    where
        C: GrayCanvas + ?Sized,
        T: AsRef<[u8]> + ?Sized,
    {
        self.draw_string_outlined(target, x, y, text, OutlineStyle::halo(thickness))
    }
}

impl Default for Rasterizer<'static> {
    fn default() -> Self {
        Self::new(camstamp_font::load())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::GrayFrame;
    use camstamp_font::{load, SMALL_8X12};
    use proptest::prelude::*;

    const W: usize = 160;
    const H: usize = 64;
    const SENTINEL: u8 = 0x5A;

    fn blank(fill: u8) -> Vec<u8> {
        vec![fill; W * H]
    }

    fn draw<T>(buf: &mut [u8], x: i32, y: i32, text: &T, color: u8) -> DrawReport
    where
        T: AsRef<[u8]> + ?Sized,
    {
        let mut frame = GrayFrame::new(buf, W, H).unwrap();
        Rasterizer::default().draw_string(&mut frame, x, y, text, color)
    }

    /// Leftmost column holding ink within `[from, to)`
    fn leftmost_ink(buf: &[u8], from: usize, to: usize, color: u8) -> Option<usize> {
        (from..to).find(|&col| (0..H).any(|row| buf[row * W + col] == color))
    }

    #[test]
    fn test_stencil_every_printable_glyph() {
        let font = load();
        for code in 32u8..127 {
            let mut buf = blank(SENTINEL);
            let text = [code];
            draw(&mut buf, 10, 5, &text, 0xFF);

            let glyph = font.glyph(code).unwrap();
            for row in 0..H {
                for col in 0..W {
                    let inside = (10..26).contains(&col) && (5..29).contains(&row);
                    let set = inside && glyph.is_set((row - 5) as u8, (col - 10) as u8);
                    let expected = if set { 0xFF } else { SENTINEL };
                    assert_eq!(buf[row * W + col], expected, "code {code} at ({col}, {row})");
                }
            }
        }
    }

    #[test]
    fn test_draw_empty_string_is_noop() {
        let mut buf = blank(SENTINEL);
        let report = draw(&mut buf, 0, 0, "", 0);
        assert_eq!(report, DrawReport::default());
        assert!(buf.iter().all(|&b| b == SENTINEL));
    }

    #[test]
    fn test_unloaded_font_is_noop() {
        let mut buf = blank(SENTINEL);
        let mut frame = GrayFrame::new(&mut buf, W, H).unwrap();
        let report = Rasterizer::unloaded().draw_string_with_border(&mut frame, 4, 4, "abc", 1);

        assert_eq!(report.pixels_written, 0);
        assert_eq!(report.first_issue, Some(RasterError::FontUnavailable));
        assert!(buf.iter().all(|&b| b == SENTINEL));
    }

    #[test]
    fn test_report_counts_pixels() {
        let font = load();
        let ink = |code: u8| font.glyph(code).unwrap().set_pixels().count();

        let mut buf = blank(0);
        let report = draw(&mut buf, 0, 0, "Hi", 0xFF);
        assert_eq!(report.glyphs_drawn, 2);
        assert_eq!(report.pixels_written, ink(b'H') + ink(b'i'));
        assert_eq!(report.pixels_clipped, 0);
        assert!(report.is_clean());
        assert_eq!(buf.iter().filter(|&&b| b == 0xFF).count(), report.pixels_written);
    }

    #[test]
    fn test_out_of_range_character_skipped() {
        let mut with_gap = blank(SENTINEL);
        let report = draw(&mut with_gap, 0, 0, "A\u{7f}B", 0xFF);
        assert_eq!(report.glyphs_drawn, 2);
        assert_eq!(report.glyphs_skipped, 1);
        assert_eq!(report.first_issue, Some(RasterError::CharacterOutOfRange(0x7F)));

        // B still lands in the third cell
        let mut expected = blank(SENTINEL);
        draw(&mut expected, 0, 0, "A", 0xFF);
        draw(&mut expected, 32, 0, "B", 0xFF);
        assert_eq!(with_gap, expected);
    }

    #[test]
    fn test_non_ascii_bytes_skipped() {
        let mut buf = blank(SENTINEL);
        // 'é' is two bytes, neither in the font
        let report = draw(&mut buf, 0, 0, "é", 0xFF);
        assert_eq!(report.glyphs_skipped, 2);
        assert_eq!(report.pixels_written, 0);
        assert!(buf.iter().all(|&b| b == SENTINEL));
    }

    #[test]
    fn test_right_edge_clips_without_wrapping() {
        let mut buf = blank(SENTINEL);
        // Third glyph straddles the right edge, fourth is fully outside
        let report = draw(&mut buf, W as i32 - 40, 8, "MMMM", 0xFF);
        assert!(report.is_clipped());
        assert!(matches!(
            report.first_issue,
            Some(RasterError::CoordinateOutOfBounds { .. })
        ));

        // Nothing wrapped into the left side of the following rows
        for row in 0..H {
            for col in 0..W - 40 {
                assert_eq!(buf[row * W + col], SENTINEL, "({col}, {row})");
            }
        }
    }

    #[test]
    fn test_bottom_edge_clips() {
        let mut buf = blank(SENTINEL);
        let report = draw(&mut buf, 0, H as i32 - 10, "W", 0xFF);
        assert!(report.is_clipped());
        assert!(report.pixels_written > 0);
        assert_eq!(buf.len(), W * H);
    }

    #[test]
    fn test_negative_origin_clips() {
        let mut buf = blank(SENTINEL);
        let report = draw(&mut buf, -8, -12, "#", 0xFF);
        assert!(report.is_clipped());

        let glyph = load().glyph(b'#').unwrap();
        for row in 0..12usize {
            for col in 0..8usize {
                let expected = if glyph.is_set(row as u8 + 12, col as u8 + 8) {
                    0xFF
                } else {
                    SENTINEL
                };
                assert_eq!(buf[row * W + col], expected);
            }
        }
    }

    #[test]
    fn test_far_away_origin_draws_nothing() {
        let mut buf = blank(SENTINEL);
        let report = draw(&mut buf, i32::MIN, i32::MAX, "xyz", 0);
        assert_eq!(report.pixels_written, 0);
        assert!(report.is_clipped());
        assert!(buf.iter().all(|&b| b == SENTINEL));
    }

    #[test]
    fn test_advance_law_leftmost_column() {
        let mut buf = blank(0);
        draw(&mut buf, 20, 10, "AB", 0xFF);

        let a = leftmost_ink(&buf, 20, 36, 0xFF).unwrap();
        let b = leftmost_ink(&buf, 36, 52, 0xFF).unwrap();
        // 'A' and 'B' both start in the same glyph column
        assert_eq!(b - a, 16);
    }

    #[test]
    fn test_small_font_advance() {
        let mut buf = blank(SENTINEL);
        let mut frame = GrayFrame::new(&mut buf, W, H).unwrap();
        let raster = Rasterizer::new(&SMALL_8X12);
        raster.draw_string(&mut frame, 0, 0, "II", 0xFF);

        let mut expected = blank(SENTINEL);
        let mut frame = GrayFrame::new(&mut expected, W, H).unwrap();
        raster.draw_string(&mut frame, 0, 0, "I", 0xFF);
        raster.draw_string(&mut frame, 8, 0, "I", 0xFF);

        assert_eq!(buf, expected);
    }

    #[test]
    fn test_border_thickness_zero_equals_white_draw() {
        let mut bordered = blank(SENTINEL);
        let mut frame = GrayFrame::new(&mut bordered, W, H).unwrap();
        Rasterizer::default().draw_string_with_border(&mut frame, 3, 7, "seq: 42", 0);

        let mut plain = blank(SENTINEL);
        draw(&mut plain, 3, 7, "seq: 42", WHITE);

        assert_eq!(bordered, plain);
    }

    #[test]
    fn test_border_center_pass_wins() {
        let mut buf = blank(SENTINEL);
        let mut frame = GrayFrame::new(&mut buf, W, H).unwrap();
        let report = Rasterizer::default().draw_string_with_border(&mut frame, 20, 20, "O", 1);
        assert_eq!(report.glyphs_drawn, 5);

        let glyph = load().glyph(b'O').unwrap();
        for pixel in glyph.set_pixels() {
            let index = (20 + pixel.row as usize) * W + 20 + pixel.col as usize;
            assert_eq!(buf[index], WHITE);
        }
        assert!(buf.contains(&BLACK));
    }

    #[test]
    fn test_outlined_custom_colors() {
        let mut buf = blank(SENTINEL);
        let mut frame = GrayFrame::new(&mut buf, W, H).unwrap();
        let style = OutlineStyle {
            thickness: 2,
            outline: 0x10,
            fill: 0xE0,
        };
        Rasterizer::default().draw_string_outlined(&mut frame, 10, 10, "|", style);

        // '|' is a two-pixel vertical stroke; its outline sits two pixels out
        let glyph = load().glyph(b'|').unwrap();
        let first = glyph.set_pixels().next().unwrap();
        let (col, row) = (10 + first.col as usize, 10 + first.row as usize);
        assert_eq!(buf[row * W + col], 0xE0);
        assert_eq!(buf[row * W + col - 2], 0x10);
        assert_eq!(buf[row * W + col - 3], SENTINEL);
    }

    #[test]
    fn test_report_add_assign_keeps_first_issue() {
        let mut total = DrawReport {
            pixels_written: 3,
            ..DrawReport::default()
        };
        total += DrawReport {
            pixels_clipped: 1,
            first_issue: Some(RasterError::CoordinateOutOfBounds { x: -1, y: 0 }),
            ..DrawReport::default()
        };
        total += DrawReport {
            glyphs_skipped: 1,
            first_issue: Some(RasterError::CharacterOutOfRange(0)),
            ..DrawReport::default()
        };

        assert_eq!(total.pixels_written, 3);
        assert_eq!(total.pixels_clipped, 1);
        assert_eq!(total.glyphs_skipped, 1);
        assert_eq!(
            total.first_issue,
            Some(RasterError::CoordinateOutOfBounds { x: -1, y: 0 })
        );
    }

    proptest! {
        #[test]
        fn prop_draw_is_idempotent(
            text in "[ -~]{0,12}",
            x in -20i32..180,
            y in -30i32..70,
            color in any::<u8>(),
        ) {
            let mut once = blank(SENTINEL);
            draw(&mut once, x, y, &text, color);

            let mut twice = once.clone();
            draw(&mut twice, x, y, &text, color);

            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_draw_never_touches_unset_pixels(
            text in "[ -~]{1,12}",
            x in -20i32..180,
            y in -30i32..70,
        ) {
            let mut buf = blank(SENTINEL);
            draw(&mut buf, x, y, &text, 0x00);

            let font = load();
            for row in 0..H as i64 {
                for col in 0..W as i64 {
                    let rel_x = col - i64::from(x);
                    let rel_y = row - i64::from(y);
                    let cell = rel_x.div_euclid(16);
                    let lit = rel_x >= 0
                        && (0..24).contains(&rel_y)
                        && (cell as usize) < text.len()
                        && font
                            .glyph(text.as_bytes()[cell as usize])
                            .unwrap()
                            .is_set(rel_y as u8, rel_x.rem_euclid(16) as u8);
                    let expected = if lit { 0x00 } else { SENTINEL };
                    prop_assert_eq!(buf[row as usize * W + col as usize], expected);
                }
            }
        }

        #[test]
        fn prop_advance_law(x in -16i32..120, y in -24i32..60) {
            let mut pair = blank(SENTINEL);
            draw(&mut pair, x, y, "AB", 0xFF);

            let mut split = blank(SENTINEL);
            draw(&mut split, x, y, "A", 0xFF);
            draw(&mut split, x + 16, y, "B", 0xFF);

            prop_assert_eq!(pair, split);
        }
    }
}
