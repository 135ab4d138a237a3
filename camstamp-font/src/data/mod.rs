//! Compiled-in font blobs

mod round_16x24;
mod small_8x12;

pub(crate) use round_16x24::ROUND_16X24_BLOB;
pub(crate) use small_8x12::SMALL_8X12_BLOB;
