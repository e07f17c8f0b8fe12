//! Packed bitmap output.
//!
//! [`IndexedImage`] is the canonical result of quantization: one index per
//! pixel plus the palette. [`PackedBitmap`] is the device layout, `B` bits
//! per pixel with byte-aligned rows.

mod bit_depth;
mod error;
mod indexed_image;
mod packed_bitmap;

pub use bit_depth::{BitDepth, PixelOrder};
pub use error::PackError;
pub use indexed_image::IndexedImage;
pub use packed_bitmap::PackedBitmap;
