//! Row-aligned packed palette indices.

use super::bit_depth::{BitDepth, PixelOrder};
use super::error::PackError;

/// Palette indices packed `B` bits per pixel.
///
/// Rows are `stride()` bytes long and always start on a byte boundary. Bits
/// past the last pixel of a row are zero. Within a byte, [`PixelOrder`]
/// decides whether the leftmost pixel sits in the low or the high bits.
///
/// # Example
///
/// ```
/// use indexed_pack::{BitDepth, PackedBitmap, PixelOrder};
///
/// let indices = [1, 2, 3, 4];
/// let low = PackedBitmap::pack(&indices, 4, 1, BitDepth::Four, PixelOrder::LowFirst).unwrap();
/// assert_eq!(low.as_bytes(), &[0x21, 0x43]);
///
/// let high = low.repack(PixelOrder::HighFirst);
/// assert_eq!(high.as_bytes(), &[0x12, 0x34]);
/// assert_eq!(high.unpack(), indices);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBitmap {
    data: Vec<u8>,
    width: usize,
    height: usize,
    bit_depth: BitDepth,
    order: PixelOrder,
}

impl PackedBitmap {
    /// Pack row-major `indices` of a `width` x `height` image.
    ///
    /// # Errors
    ///
    /// - [`PackError::LengthMismatch`] if `indices.len() != width * height`.
    /// - [`PackError::IndexOutOfRange`] if an index needs more than `B` bits.
    pub fn pack(
        indices: &[u8],
        width: usize,
        height: usize,
        bit_depth: BitDepth,
        order: PixelOrder,
    ) -> Result<Self, PackError> {
        let expected = width * height;
        if indices.len() != expected {
            return Err(PackError::LengthMismatch {
                expected,
                actual: indices.len(),
            });
        }
        let capacity = bit_depth.capacity();
        if let Some(&index) = indices.iter().find(|&&index| index as usize >= capacity) {
            return Err(PackError::IndexOutOfRange { index, capacity });
        }

        Ok(Self {
            data: pack_rows(indices, width, bit_depth, order),
            width,
            height,
            bit_depth,
            order,
        })
    }

    /// Wrap already packed bytes.
    ///
    /// # Errors
    ///
    /// [`PackError::LengthMismatch`] if `data` is not exactly
    /// `stride * height` bytes.
    pub fn from_bytes(
        data: Vec<u8>,
        width: usize,
        height: usize,
        bit_depth: BitDepth,
        order: PixelOrder,
    ) -> Result<Self, PackError> {
        let expected = bit_depth.stride(width) * height;
        if data.len() != expected {
            return Err(PackError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            bit_depth,
            order,
        })
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

    /// Bits per pixel.
    #[inline]
    pub fn bit_depth(&self) -> BitDepth {
        self.bit_depth
    }

    /// In-byte pixel order.
    #[inline]
    pub fn order(&self) -> PixelOrder {
        self.order
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.bit_depth.stride(self.width)
    }

    /// The packed bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the bitmap, returning the packed bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Palette index of the pixel at (`x`, `y`), or `None` outside the image.
    pub fn index_at(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let per_byte = self.bit_depth.pixels_per_byte();
        let bits = self.bit_depth.bits();
        let byte = self.data[y * self.stride() + x / per_byte];
        let shift = self.order.shift(x % per_byte, bits);
        Some((byte >> shift) & mask(bits))
    }

    /// Expand back to one index per pixel, row-major.
    pub fn unpack(&self) -> Vec<u8> {
        let per_byte = self.bit_depth.pixels_per_byte();
        let bits = self.bit_depth.bits();
        let stride = self.stride();
        let mut indices = Vec::with_capacity(self.width * self.height);

        for row in self.data.chunks(stride.max(1)).take(self.height) {
            for x in 0..self.width {
                let shift = self.order.shift(x % per_byte, bits);
                indices.push((row[x / per_byte] >> shift) & mask(bits));
            }
        }
        indices
    }

    /// The same pixels packed with a different in-byte order.
    pub fn repack(&self, order: PixelOrder) -> PackedBitmap {
        if order == self.order {
            return self.clone();
        }
        let indices = self.unpack();
        Self {
            data: pack_rows(&indices, self.width, self.bit_depth, order),
            width: self.width,
            height: self.height,
            bit_depth: self.bit_depth,
            order,
        }
    }
}

#[inline]
fn mask(bits: u8) -> u8 {
    (((1u16) << bits) - 1) as u8
}

fn pack_rows(indices: &[u8], width: usize, bit_depth: BitDepth, order: PixelOrder) -> Vec<u8> {
    if width == 0 {
        return Vec::new();
    }
    let bits = bit_depth.bits();
    let per_byte = bit_depth.pixels_per_byte();
    let height = indices.len() / width;
    let mut packed = Vec::with_capacity(bit_depth.stride(width) * height);

    for row in indices.chunks(width) {
        let mut byte = 0u8;
        for (i, &index) in row.iter().enumerate() {
            let slot = i % per_byte;
            byte |= (index & mask(bits)) << order.shift(slot, bits);

            if slot == per_byte - 1 || i == row.len() - 1 {
                packed.push(byte);
                byte = 0;
            }
        }
    }

    packed
}
