//! Glyph access
//!
//! Glyph bitmaps are bit-packed; these iterators hide the byte/bit stride
//! math so renderers only ever see `(row, col, set)` triples.

/// One glyph bitmap
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Glyph<'a> {
    /// Packed rows, exactly `ceil(width/8) * height` bytes
    bytes: &'a [u8],
    width: u8,
    height: u8,
}

impl<'a> Glyph<'a> {
    /// Callers guarantee `bytes` holds a whole glyph.
    pub(crate) const fn new(bytes: &'a [u8], width: u8, height: u8) -> Self {
        Self {
            bytes,
            width,
            height,
        }
    }

    /// Glyph width in pixels
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Glyph height in pixels
    pub const fn height(&self) -> u8 {
        self.height
    }

    /// Raw packed bytes of this glyph
    pub const fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    const fn bytes_per_row(&self) -> usize {
        (self.width as usize).div_ceil(8)
    }

    /// Check a single pixel; out-of-glyph coordinates read as unset
    pub fn is_set(&self, row: u8, col: u8) -> bool {
        if row >= self.height || col >= self.width {
            return false;
        }
        let index = row as usize * self.bytes_per_row() + (col / 8) as usize;
        self.bytes
            .get(index)
            .is_some_and(|byte| byte & (0x80 >> (col % 8)) != 0)
    }

    /// Iterate over every pixel, row-major
    pub fn pixels(&self) -> GlyphPixels<'a> {
        GlyphPixels {
            glyph: *self,
            row: 0,
            col: 0,
        }
    }

    /// Iterate over only the pixels that are set
    pub fn set_pixels(&self) -> impl Iterator<Item = GlyphPixel> + 'a {
        self.pixels().filter(|pixel| pixel.set)
    }

    /// Iterate over the rows of this glyph
    pub fn rows(&self) -> GlyphRows<'a> {
        GlyphRows {
            glyph: *self,
            index: 0,
        }
    }
}

/// A pixel position inside a glyph and whether its bit is set
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GlyphPixel {
    /// Row from the top of the glyph cell
    pub row: u8,
    /// Column from the left of the glyph cell
    pub col: u8,
    /// Whether the bit is set (ink)
    pub set: bool,
}

/// Row-major iterator over all pixels of a [`Glyph`]
#[derive(Clone, Debug)]
pub struct GlyphPixels<'a> {
    glyph: Glyph<'a>,
    row: u8,
    col: u8,
}

impl Iterator for GlyphPixels<'_> {
    type Item = GlyphPixel;

    fn next(&mut self) -> Option<Self::Item> {
        if self.row >= self.glyph.height {
            return None;
        }

        let pixel = GlyphPixel {
            row: self.row,
            col: self.col,
            set: self.glyph.is_set(self.row, self.col),
        };

        self.col += 1;
        if self.col >= self.glyph.width {
            self.col = 0;
            self.row += 1;
        }

        Some(pixel)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let total = self.glyph.width as usize * self.glyph.height as usize;
        let done = self.row as usize * self.glyph.width as usize + self.col as usize;
        let remaining = total.saturating_sub(done);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GlyphPixels<'_> {}

/// Iterator over the rows of a [`Glyph`]
#[derive(Clone, Debug)]
pub struct GlyphRows<'a> {
    glyph: Glyph<'a>,
    index: u8,
}

impl<'a> Iterator for GlyphRows<'a> {
    type Item = GlyphRow<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.glyph.height {
            return None;
        }

        let row = GlyphRow {
            glyph: self.glyph,
            row: self.index,
        };
        self.index += 1;
        Some(row)
    }
}

/// A single row of a [`Glyph`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphRow<'a> {
    glyph: Glyph<'a>,
    row: u8,
}

impl GlyphRow<'_> {
    /// Row index from the top of the glyph
    pub const fn index(&self) -> u8 {
        self.row
    }

    /// Pixel values of this row, leftmost first
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.glyph.width).map(move |col| self.glyph.is_set(self.row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{load, FontTable};
    use proptest::prelude::*;

    // Two 16x2 glyphs: a diagonal-ish pattern and a solid block
    const BLOB: [u8; 12] = [
        16, 2, b'a', 2, //
        0b1000_0001, 0b0000_0001, //
        0b0100_0000, 0b1000_0000, //
        0xFF, 0xFF, //
        0xFF, 0xFF,
    ];

    #[test]
    fn test_msb_is_leftmost() {
        let font = FontTable::from_blob(&BLOB).unwrap();
        let glyph = font.glyph(b'a').unwrap();

        let set: Vec<(u8, u8)> = glyph.set_pixels().map(|p| (p.row, p.col)).collect();
        assert_eq!(set, vec![(0, 0), (0, 7), (0, 15), (1, 1), (1, 8)]);
    }

    #[test]
    fn test_pixels_cover_cell_row_major() {
        let font = FontTable::from_blob(&BLOB).unwrap();
        let glyph = font.glyph(b'b').unwrap();

        let pixels: Vec<GlyphPixel> = glyph.pixels().collect();
        assert_eq!(pixels.len(), 32);
        assert_eq!(pixels[0], GlyphPixel { row: 0, col: 0, set: true });
        assert_eq!(pixels[16], GlyphPixel { row: 1, col: 0, set: true });
        assert_eq!(pixels[31], GlyphPixel { row: 1, col: 15, set: true });
    }

    #[test]
    fn test_rows_match_pixels() {
        let glyph = load().glyph(b'A').unwrap();
        let mut from_rows = Vec::new();
        for row in glyph.rows() {
            for (col, set) in row.bits().enumerate() {
                from_rows.push(GlyphPixel {
                    row: row.index(),
                    col: col as u8,
                    set,
                });
            }
        }
        let from_pixels: Vec<GlyphPixel> = glyph.pixels().collect();
        assert_eq!(from_rows, from_pixels);
    }

    #[test]
    fn test_is_set_outside_cell() {
        let glyph = load().glyph(b'#').unwrap();
        assert!(!glyph.is_set(24, 0));
        assert!(!glyph.is_set(0, 16));
    }

    #[test]
    fn test_size_hint_tracks_progress() {
        let glyph = load().glyph(b'x').unwrap();
        let mut pixels = glyph.pixels();
        assert_eq!(pixels.len(), 16 * 24);
        pixels.next();
        pixels.next();
        assert_eq!(pixels.len(), 16 * 24 - 2);
    }

    proptest! {
        #[test]
        fn prop_pixels_agree_with_packed_bytes(code in 32u8..127) {
            let font = load();
            let glyph = font.glyph(code).unwrap();
            for pixel in glyph.pixels() {
                let byte = glyph.bytes()[pixel.row as usize * 2 + pixel.col as usize / 8];
                let bit = (byte >> (7 - pixel.col % 8)) & 1 == 1;
                prop_assert_eq!(pixel.set, bit);
            }
        }
    }
}
