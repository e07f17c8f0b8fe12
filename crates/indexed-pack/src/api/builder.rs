//! IndexedEncoder builder, the main entry point of the crate.
//!
//! [`IndexedEncoder`] wraps quantization, packing and palette serialization
//! behind a fluent builder.

use std::collections::HashMap;

use super::error::EncodeError;
use crate::color::Rgba;
use crate::output::{BitDepth, IndexedImage, PackedBitmap, PixelOrder};
use crate::palette::{Palette, PaletteFormat, PaletteLayout};
use crate::preprocess::CanonicalImage;
use crate::quantize::{quantize, QuantizeOptions, DEFAULT_QUANTIZE_COUNT};

/// The two payloads of an encoded image.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedAssets {
    /// Packed palette indices.
    pub bitmap: PackedBitmap,
    /// The palette the indices refer to.
    pub palette: Palette,
    /// The palette serialized in the configured layout.
    pub palette_bytes: Vec<u8>,
}

/// Converts canonical images into packed bitmaps with a palette.
///
/// - Constructor takes the bit depth, everything else has a default
/// - Configuration methods consume and return `self`
/// - [`encode()`](Self::encode) takes `&self`, so one encoder can be reused
///   across images
///
/// # Example
///
/// ```
/// use indexed_pack::{BitDepth, CanonicalImage, IndexedEncoder, PaletteFormat, Rgba};
///
/// let pixels = vec![
///     Rgba::opaque(0, 0, 0),
///     Rgba::opaque(255, 255, 255),
///     Rgba::opaque(255, 255, 255),
///     Rgba::opaque(0, 0, 0),
/// ];
/// let image = CanonicalImage::new(2, 2, pixels).unwrap();
///
/// let encoder = IndexedEncoder::new(BitDepth::Four)
///     .quantize_count(16)
///     .palette_format(PaletteFormat::Psx16);
/// let assets = encoder.encode(&image).unwrap();
///
/// assert_eq!(assets.bitmap.as_bytes(), &[0x10, 0x01]);
/// assert_eq!(assets.palette.len(), 2);
/// assert_eq!(assets.palette_bytes, vec![0x00, 0x80, 0xFF, 0x7F]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedEncoder {
    bit_depth: BitDepth,
    quantize: QuantizeOptions,
    pixel_order: PixelOrder,
    layout: PaletteLayout,
    pad_palette: bool,
}

impl IndexedEncoder {
    /// Create an encoder for `bit_depth`.
    ///
    /// The default palette size is 16 entries, or the depth's capacity when
    /// that is smaller. Pixels are packed low-first and the palette is
    /// written as unpadded RGBA8888.
    pub fn new(bit_depth: BitDepth) -> Self {
        let quantize = QuantizeOptions {
            quantize_count: DEFAULT_QUANTIZE_COUNT.min(bit_depth.capacity()),
            ..QuantizeOptions::default()
        };
        Self {
            bit_depth,
            quantize,
            pixel_order: PixelOrder::default(),
            layout: PaletteLayout::default(),
            pad_palette: false,
        }
    }

    /// Maximum palette entries. Zero keeps every distinct color and fails
    /// if they do not fit the depth.
    #[inline]
    pub fn quantize_count(mut self, count: usize) -> Self {
        self.quantize.quantize_count = count;
        self
    }

    /// Maximum perceptual refinement passes after the median cut.
    #[inline]
    pub fn refine_iterations(mut self, iterations: usize) -> Self {
        self.quantize.refine_iterations = iterations;
        self
    }

    /// In-byte pixel order of the bitmap.
    #[inline]
    pub fn pixel_order(mut self, order: PixelOrder) -> Self {
        self.pixel_order = order;
        self
    }

    /// Serialized palette entry format.
    #[inline]
    pub fn palette_format(mut self, format: PaletteFormat) -> Self {
        self.layout.format = format;
        self
    }

    /// Alpha below which `psx16` entries become transparent.
    #[inline]
    pub fn alpha_cutoff(mut self, cutoff: u8) -> Self {
        self.layout.alpha_cutoff = cutoff;
        self
    }

    /// Pad the serialized palette to the full `2^B` entries.
    #[inline]
    pub fn pad_palette(mut self, pad: bool) -> Self {
        self.pad_palette = pad;
        self
    }

    /// Check the configuration before any image is processed.
    ///
    /// # Errors
    ///
    /// [`EncodeError::InvalidQuantizeCount`] if the palette size exceeds
    /// the depth's capacity.
    pub fn validated(self) -> Result<Self, EncodeError> {
        let capacity = self.bit_depth.capacity();
        if self.quantize.quantize_count > capacity {
            return Err(EncodeError::InvalidQuantizeCount {
                count: self.quantize.quantize_count,
                capacity,
            });
        }
        Ok(self)
    }

    /// The configured bit depth.
    #[inline]
    pub fn bit_depth(&self) -> BitDepth {
        self.bit_depth
    }

    /// The configured quantization options.
    #[inline]
    pub fn quantize_options(&self) -> QuantizeOptions {
        self.quantize
    }

    /// The palette serialization layout, padding included.
    pub fn palette_layout(&self) -> PaletteLayout {
        let layout = self.layout;
        if self.pad_palette {
            layout.pad_to(self.bit_depth.capacity())
        } else {
            layout
        }
    }

    /// Quantize `image` to a palette and one index per pixel.
    pub fn index(&self, image: &CanonicalImage) -> Result<IndexedImage, EncodeError> {
        let result = quantize(image.pixels(), self.bit_depth, &self.quantize)?;
        Ok(IndexedImage::new(
            result.indices,
            image.width() as usize,
            image.height() as usize,
            result.palette,
        ))
    }

    /// Map `image` onto an existing palette instead of building one.
    ///
    /// Every pixel takes the perceptually nearest entry, lowest index on
    /// ties.
    ///
    /// # Errors
    ///
    /// [`EncodeError::PaletteOverflow`] if `palette` has more entries than
    /// the depth can index.
    pub fn index_with_palette(
        &self,
        image: &CanonicalImage,
        palette: &Palette,
    ) -> Result<IndexedImage, EncodeError> {
        let capacity = self.bit_depth.capacity();
        if palette.len() > capacity {
            return Err(EncodeError::PaletteOverflow {
                distinct: palette.len(),
                capacity,
            });
        }

        let mut cache: HashMap<Rgba, u8> = HashMap::new();
        let indices = image
            .pixels()
            .iter()
            .map(|&pixel| {
                *cache
                    .entry(pixel)
                    .or_insert_with(|| palette.find_nearest(pixel) as u8)
            })
            .collect();

        Ok(IndexedImage::new(
            indices,
            image.width() as usize,
            image.height() as usize,
            palette.clone(),
        ))
    }

    /// Quantize, pack and serialize `image`.
    pub fn encode(&self, image: &CanonicalImage) -> Result<EncodedAssets, EncodeError> {
        let indexed = self.index(image)?;
        self.pack(indexed)
    }

    /// Pack an already indexed image with this encoder's layout options.
    pub fn pack(&self, indexed: IndexedImage) -> Result<EncodedAssets, EncodeError> {
        let bitmap = indexed.pack(self.bit_depth, self.pixel_order)?;
        let (_, palette) = indexed.into_parts();
        let palette_bytes = palette.to_bytes(&self.palette_layout());
        Ok(EncodedAssets {
            bitmap,
            palette,
            palette_bytes,
        })
    }
}
