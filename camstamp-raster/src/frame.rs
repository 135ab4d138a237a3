//! Grayscale frame access
//!
//! Defines the canvas interface the rasterizer draws through, and a
//! bounds-checked view over a caller-owned byte buffer.

use crate::error::RasterError;

/// Canvas trait
///
/// Every pixel write of the rasterizer goes through [`put_pixel`], so an
/// implementation only has to get bounds checking right in one place.
///
/// [`put_pixel`]: GrayCanvas::put_pixel
pub trait GrayCanvas {
    /// Get the canvas dimensions as (width, height) in pixels
    fn dimensions(&self) -> (usize, usize);

    /// Write one pixel
    ///
    /// Returns `CoordinateOutOfBounds` without writing anything if
    /// `(x, y)` lies outside `[0, width) x [0, height)`.
    fn put_pixel(&mut self, x: i64, y: i64, value: u8) -> Result<(), RasterError>;

    /// Read one pixel, `None` outside the canvas
    fn pixel(&self, x: i64, y: i64) -> Option<u8>;
}

/// Bounds-checked view over a row-major, one-byte-per-pixel frame
///
/// The view borrows the buffer; it never allocates or frees it.
#[derive(Debug)]
pub struct GrayFrame<'buf> {
    buf: &'buf mut [u8],
    width: usize,
    height: usize,
    /// Bytes from the start of one row to the start of the next
    stride: usize,
}

impl<'buf> GrayFrame<'buf> {
    /// Wrap a tightly packed `width * height` buffer
    pub fn new(buf: &'buf mut [u8], width: usize, height: usize) -> Result<Self, RasterError> {
        Self::with_stride(buf, width, height, width)
    }

    /// Wrap a buffer whose rows are `stride` bytes apart
    ///
    /// Padding bytes between rows are never touched.
    pub fn with_stride(
        buf: &'buf mut [u8],
        width: usize,
        height: usize,
        stride: usize,
    ) -> Result<Self, RasterError> {
        if stride < width {
            return Err(RasterError::InvalidStride { width, stride });
        }

        // The last row does not need its padding
        let needed = match height {
            0 => 0,
            rows => stride
                .checked_mul(rows - 1)
                .and_then(|n| n.checked_add(width))
                .unwrap_or(usize::MAX),
        };
        if buf.len() < needed {
            return Err(RasterError::BufferTooSmall {
                needed,
                actual: buf.len(),
            });
        }

        Ok(Self {
            buf,
            width,
            height,
            stride,
        })
    }

    /// Frame width in pixels
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Frame height in pixels
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Row stride in bytes
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Buffer index of `(x, y)`, or `None` outside the frame
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.stride + x)
    }

    /// Get one row of pixels, without padding
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.stride;
        self.buf.get(start..start + self.width)
    }

    /// Set every pixel of the frame to `value`
    pub fn fill(&mut self, value: u8) {
        for y in 0..self.height {
            let start = y * self.stride;
            if let Some(row) = self.buf.get_mut(start..start + self.width) {
                row.fill(value);
            }
        }
    }
}

impl GrayCanvas for GrayFrame<'_> {
    fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn put_pixel(&mut self, x: i64, y: i64, value: u8) -> Result<(), RasterError> {
        let index = self
            .index(x, y)
            .ok_or(RasterError::CoordinateOutOfBounds { x, y })?;
        self.buf[index] = value;
        Ok(())
    }

    fn pixel(&self, x: i64, y: i64) -> Option<u8> {
        self.index(x, y).map(|index| self.buf[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_short_buffer() {
        let mut buf = [0u8; 11];
        assert_eq!(
            GrayFrame::new(&mut buf, 4, 3).unwrap_err(),
            RasterError::BufferTooSmall {
                needed: 12,
                actual: 11
            }
        );
    }

    #[test]
    fn test_with_stride_rejects_narrow_stride() {
        let mut buf = [0u8; 16];
        assert_eq!(
            GrayFrame::with_stride(&mut buf, 4, 2, 3).unwrap_err(),
            RasterError::InvalidStride {
                width: 4,
                stride: 3
            }
        );
    }

    #[test]
    fn test_with_stride_last_row_unpadded() {
        // 2 rows of 3 pixels with 5-byte stride: 5 + 3 bytes
        let mut buf = [0u8; 8];
        assert!(GrayFrame::with_stride(&mut buf, 3, 2, 5).is_ok());
    }

    #[test]
    fn test_empty_frame() {
        let mut buf = [0u8; 0];
        let mut frame = GrayFrame::new(&mut buf, 0, 0).unwrap();
        assert!(frame.put_pixel(0, 0, 1).is_err());
        frame.fill(9);
    }

    #[test]
    fn test_put_pixel_in_bounds() {
        let mut buf = [0u8; 12];
        let mut frame = GrayFrame::new(&mut buf, 4, 3).unwrap();
        frame.put_pixel(3, 2, 0xAB).unwrap();
        frame.put_pixel(0, 0, 0x01).unwrap();
        assert_eq!(frame.pixel(3, 2), Some(0xAB));
        assert_eq!(buf[11], 0xAB);
        assert_eq!(buf[0], 0x01);
    }

    #[test]
    fn test_put_pixel_out_of_bounds() {
        let mut buf = [7u8; 12];
        let mut frame = GrayFrame::new(&mut buf, 4, 3).unwrap();

        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 3), (i64::MIN, i64::MAX)] {
            assert_eq!(
                frame.put_pixel(x, y, 0),
                Err(RasterError::CoordinateOutOfBounds { x, y })
            );
            assert_eq!(frame.pixel(x, y), None);
        }
        assert!(buf.iter().all(|&b| b == 7));
    }

    #[test]
    fn test_x_past_width_does_not_wrap() {
        let mut buf = [0u8; 12];
        let mut frame = GrayFrame::new(&mut buf, 4, 3).unwrap();
        // (4, 0) would alias (0, 1) with unchecked offset math
        assert!(frame.put_pixel(4, 0, 0xFF).is_err());
        assert_eq!(frame.pixel(0, 1), Some(0));
    }

    #[test]
    fn test_stride_padding_untouched() {
        let mut buf = [0x55u8; 10];
        let mut frame = GrayFrame::with_stride(&mut buf, 3, 2, 5).unwrap();
        frame.fill(0);
        frame.put_pixel(2, 1, 9).unwrap();
        assert_eq!(frame.row(1), Some(&[0, 0, 9][..]));
        assert_eq!(frame.row(2), None);
        assert_eq!(buf, [0, 0, 0, 0x55, 0x55, 0, 0, 9, 0x55, 0x55]);
    }
}
