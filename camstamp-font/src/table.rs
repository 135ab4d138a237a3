//! Font table
//!
//! A `FontTable` describes one fixed-size bitmap font. Tables are built in
//! const context from a blob, so a malformed built-in font fails the build
//! instead of misbehaving at runtime.

use crate::data::{ROUND_16X24_BLOB, SMALL_8X12_BLOB};
use crate::glyph::Glyph;

/// Blob header size: width, height, first code, glyph count
pub const HEADER_LEN: usize = 4;

/// Rounded 16x24 caption font, the default returned by [`load`]
pub static ROUND_16X24: FontTable<'static> = match FontTable::from_blob(&ROUND_16X24_BLOB) {
    Some(font) => font,
    None => panic!("ROUND_16X24 blob is malformed"),
};

/// Compact 8x12 font
pub static SMALL_8X12: FontTable<'static> = match FontTable::from_blob(&SMALL_8X12_BLOB) {
    Some(font) => font,
    None => panic!("SMALL_8X12 blob is malformed"),
};

/// Return the default compiled-in font
pub fn load() -> &'static FontTable<'static> {
    &ROUND_16X24
}

/// Immutable description of a monospace bitmap font
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontTable<'a> {
    /// Width of every glyph in pixels (multiple of 8)
    glyph_width: u8,
    /// Height of every glyph in pixels
    glyph_height: u8,
    /// Character code of glyph 0
    first_code: u8,
    /// Number of glyphs stored
    glyph_count: u8,
    /// Packed glyph data, exactly `glyph_count * glyph_bytes()` long
    pixels: &'a [u8],
}

impl<'a> FontTable<'a> {
    /// Create a font table from its parts
    ///
    /// Returns `None` if any dimension is zero, if the width is not a
    /// multiple of 8, if the code range does not fit in a byte, or if
    /// `pixels` is too short. Extra trailing bytes are ignored.
    pub const fn new(
        glyph_width: u8,
        glyph_height: u8,
        first_code: u8,
        glyph_count: u8,
        pixels: &'a [u8],
    ) -> Option<Self> {
        if glyph_width == 0 || glyph_height == 0 || glyph_count == 0 {
            return None;
        }
        if glyph_width % 8 != 0 {
            return None;
        }
        if first_code as usize + glyph_count as usize > 256 {
            return None;
        }

        let needed = glyph_count as usize * (glyph_width as usize / 8) * glyph_height as usize;
        if pixels.len() < needed {
            return None;
        }

        Some(Self {
            glyph_width,
            glyph_height,
            first_code,
            glyph_count,
            pixels: pixels.split_at(needed).0,
        })
    }

    /// Create a font table from a blob with a 4-byte header
    pub const fn from_blob(blob: &'a [u8]) -> Option<Self> {
        if blob.len() < HEADER_LEN {
            return None;
        }

        let (header, pixels) = blob.split_at(HEADER_LEN);
        Self::new(header[0], header[1], header[2], header[3], pixels)
    }

    /// Glyph width in pixels
    pub const fn glyph_width(&self) -> u8 {
        self.glyph_width
    }

    /// Glyph height in pixels
    pub const fn glyph_height(&self) -> u8 {
        self.glyph_height
    }

    /// Character code of the first glyph
    pub const fn first_code(&self) -> u8 {
        self.first_code
    }

    /// Number of glyphs in the table
    pub const fn glyph_count(&self) -> u8 {
        self.glyph_count
    }

    /// Packed pixel data for all glyphs
    pub const fn pixels(&self) -> &'a [u8] {
        self.pixels
    }

    /// Bytes per glyph row
    pub const fn glyph_bytes_per_row(&self) -> usize {
        (self.glyph_width as usize).div_ceil(8)
    }

    /// Bytes per glyph
    pub const fn glyph_bytes(&self) -> usize {
        self.glyph_bytes_per_row() * self.glyph_height as usize
    }

    /// Check whether `code` has a glyph in this table
    pub const fn contains(&self, code: u8) -> bool {
        code >= self.first_code && ((code - self.first_code) as usize) < self.glyph_count as usize
    }

    /// Byte offset of the glyph for `code` within [`pixels`](Self::pixels)
    ///
    /// Returns `None` for codes outside the table.
    pub const fn glyph_offset(&self, code: u8) -> Option<usize> {
        if !self.contains(code) {
            return None;
        }
        Some((code - self.first_code) as usize * self.glyph_bytes())
    }

    /// Get the glyph for `code`
    pub fn glyph(&self, code: u8) -> Option<Glyph<'a>> {
        let offset = self.glyph_offset(code)?;
        let bytes = self.pixels.get(offset..offset + self.glyph_bytes())?;
        Some(Glyph::new(bytes, self.glyph_width, self.glyph_height))
    }

    /// Horizontal advance per character (fixed, zero gap)
    pub const fn advance(&self) -> u8 {
        self.glyph_width
    }

    /// Width in pixels of a run of `len` characters
    pub const fn text_width(&self, len: usize) -> usize {
        len * self.glyph_width as usize
    }

    /// Iterate over every `(code, glyph)` pair in the table
    pub fn glyphs(&self) -> impl Iterator<Item = (u8, Glyph<'a>)> + '_ {
        (0..self.glyph_count).filter_map(move |index| {
            let code = self.first_code + index;
            self.glyph(code).map(|glyph| (code, glyph))
        })
    }
}

impl core::fmt::Debug for FontTable<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FontTable")
            .field("glyph_width", &self.glyph_width)
            .field("glyph_height", &self.glyph_height)
            .field("first_code", &self.first_code)
            .field("glyph_count", &self.glyph_count)
            .field("pixels", &self.pixels.len())
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FontTable<'_> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "FontTable[{}x{}, codes {}+{}]",
            self.glyph_width,
            self.glyph_height,
            self.first_code,
            self.glyph_count
        );
    }
}
