//! Indexed image: palette indices plus the palette they refer to.

use super::bit_depth::{BitDepth, PixelOrder};
use super::error::PackError;
use super::packed_bitmap::PackedBitmap;
use crate::color::Rgba;
use crate::palette::Palette;

/// The unpacked output of quantization.
///
/// Stores one `u8` palette index per pixel in row-major order along with
/// the image dimensions and the palette. Packing into a device layout is
/// done on demand with [`pack()`](IndexedImage::pack).
///
/// # Example
///
/// ```
/// use indexed_pack::{BitDepth, IndexedImage, Palette, PixelOrder, Rgba};
///
/// let palette = Palette::new(vec![Rgba::opaque(0, 0, 0), Rgba::opaque(255, 255, 255)]).unwrap();
/// let image = IndexedImage::new(vec![0, 1, 1, 0], 2, 2, palette);
///
/// assert_eq!(image.to_rgba()[4..8], [255, 255, 255, 255]);
///
/// let packed = image.pack(BitDepth::One, PixelOrder::HighFirst).unwrap();
/// assert_eq!(packed.as_bytes(), &[0b0100_0000, 0b1000_0000]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedImage {
    indices: Vec<u8>,
    width: usize,
    height: usize,
    palette: Palette,
}

impl IndexedImage {
    /// Create an indexed image.
    ///
    /// Every index must be in `0..palette.len()`.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `indices.len() == width * height`.
    pub fn new(indices: Vec<u8>, width: usize, height: usize, palette: Palette) -> Self {
        debug_assert_eq!(
            indices.len(),
            width * height,
            "indices length ({}) must match width * height ({}x{}={})",
            indices.len(),
            width,
            height,
            width * height,
        );
        Self {
            indices,
            width,
            height,
            palette,
        }
    }

    /// Palette indices, row-major.
    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The palette the indices refer to.
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Split into indices and palette.
    pub fn into_parts(self) -> (Vec<u8>, Palette) {
        (self.indices, self.palette)
    }

    /// First index with no palette entry, if any.
    pub fn find_unmapped(&self) -> Option<u8> {
        let len = self.palette.len();
        self.indices
            .iter()
            .copied()
            .find(|&index| index as usize >= len)
    }

    /// Reconstruct RGBA bytes by looking every index up in the palette.
    ///
    /// The returned buffer has length `width * height * 4`. Indices past the
    /// end of the palette come out as transparent black.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.indices.len() * 4);
        for &idx in &self.indices {
            let color = self.palette.get(idx as usize).unwrap_or(Rgba::TRANSPARENT);
            rgba.extend_from_slice(&color.to_bytes());
        }
        rgba
    }

    /// Pack the indices at `bit_depth` with the given in-byte order.
    ///
    /// # Errors
    ///
    /// [`PackError::MissingPaletteEntry`] if an index has no palette entry,
    /// [`PackError::IndexOutOfRange`] if the palette is larger than the
    /// depth can address and an index exceeds it.
    pub fn pack(&self, bit_depth: BitDepth, order: PixelOrder) -> Result<PackedBitmap, PackError> {
        if let Some(index) = self.find_unmapped() {
            return Err(PackError::MissingPaletteEntry {
                index,
                palette_len: self.palette.len(),
            });
        }
        PackedBitmap::pack(&self.indices, self.width, self.height, bit_depth, order)
    }
}
