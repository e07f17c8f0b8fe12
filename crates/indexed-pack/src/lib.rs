#![allow(clippy::excessive_precision, clippy::module_inception)]

//! indexed-pack: palette quantization and bit-packed bitmaps
//!
//! This library turns RGBA rasters into the two payloads that small
//! embedded display pipelines consume: a bitmap of `B`-bit palette indices
//! (`B` in {1, 2, 4, 8}) and a palette file.
//!
//! # Quick Start
//!
//! The [`IndexedEncoder`] builder is the primary entry point:
//!
//! ```
//! use indexed_pack::{BitDepth, CanonicalImage, IndexedEncoder, Rgba};
//!
//! let pixels = vec![Rgba::opaque(40, 40, 200); 320 * 240];
//! let image = CanonicalImage::new(320, 240, pixels).unwrap();
//!
//! let assets = IndexedEncoder::new(BitDepth::Four).encode(&image).unwrap();
//!
//! assert_eq!(assets.bitmap.as_bytes().len(), 38_400);
//! assert_eq!(assets.palette.len(), 1);
//! ```
//!
//! # Decoding Sources
//!
//! [`SourceImage`] decodes PNG and JPEG into RGBA8, and [`resample()`]
//! brings it to the output size with a Lanczos3 filter:
//!
//! ```no_run
//! use indexed_pack::{resample, ResizeMode, Rgba, SourceImage};
//!
//! let source = SourceImage::open("background.png").unwrap();
//! let canonical = resample(&source, 320, 240, ResizeMode::Stretch, Rgba::TRANSPARENT).unwrap();
//! ```
//!
//! # Quantization
//!
//! Images with at most `Q` distinct colors keep them exactly. Larger images
//! go through a population-weighted median cut in RGBA followed by a few
//! k-means passes in a perceptual space, where distance is measured in
//! Oklab and scaled by visibility:
//!
//! ```text
//! d = min(alpha1, alpha2) * |lab1 - lab2|^2 + (alpha1 - alpha2)^2
//! ```
//!
//! Two fully transparent colors are therefore identical whatever their RGB,
//! and opaque colors compare by perceived difference.
//!
//! Palette entries are ordered by first use in row-major order, so index 0
//! is always the color of the top-left pixel. The whole process is
//! deterministic.
//!
//! # Output Layout
//!
//! | Payload | Layout |
//! |---------|--------|
//! | Bitmap | `ceil(width * B / 8)` bytes per row, rows top to bottom, trailing bits zero |
//! | Palette `rgba8888` | 4 bytes per entry: R, G, B, A |
//! | Palette `psx16` | 2 bytes per entry, little-endian `R5 \| G5 << 5 \| B5 << 10` |
//!
//! [`PixelOrder`] selects whether the leftmost pixel of a byte sits in the
//! low bits (the default, console VRAM order) or the high bits (PNG order).

pub mod api;
pub mod color;
pub mod output;
pub mod palette;
pub mod preprocess;
pub mod quantize;

#[cfg(test)]
mod domain_tests;

pub use api::{EncodeError, EncodedAssets, IndexedEncoder};
pub use color::{LinearRgb, Oklab, PerceptualColor, Rgba};
pub use output::{BitDepth, IndexedImage, PackError, PackedBitmap, PixelOrder};
pub use palette::{
    Palette, PaletteError, PaletteFormat, PaletteLayout, ParseColorError, DEFAULT_ALPHA_CUTOFF,
};
pub use preprocess::{resample, CanonicalImage, ResampleError, ResizeMode, SourceImage};
pub use quantize::{
    quantize, ColorHistogram, HistogramEntry, QuantizeOptions, Quantized, DEFAULT_QUANTIZE_COUNT,
    DEFAULT_REFINE_ITERATIONS,
};
