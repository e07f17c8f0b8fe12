//! Bit depth and in-byte pixel order of packed bitmaps.

use std::fmt;
use std::str::FromStr;

/// Bits per pixel of a packed bitmap.
///
/// Only depths that divide a byte evenly are supported, so pixels never
/// straddle a byte boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitDepth {
    /// 2 colors, 8 pixels per byte.
    One,
    /// 4 colors, 4 pixels per byte.
    Two,
    /// 16 colors, 2 pixels per byte.
    Four,
    /// 256 colors, 1 pixel per byte.
    Eight,
}

impl BitDepth {
    /// All supported depths, smallest first.
    pub const ALL: [BitDepth; 4] = [BitDepth::One, BitDepth::Two, BitDepth::Four, BitDepth::Eight];

    /// Map a bit count to a depth. Returns `None` for anything but 1, 2, 4, 8.
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            4 => Some(Self::Four),
            8 => Some(Self::Eight),
            _ => None,
        }
    }

    /// Bits per pixel.
    #[inline]
    pub fn bits(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 4,
            Self::Eight => 8,
        }
    }

    /// Number of palette entries addressable at this depth.
    #[inline]
    pub fn capacity(self) -> usize {
        1 << self.bits()
    }

    /// Pixels stored in one byte.
    #[inline]
    pub fn pixels_per_byte(self) -> usize {
        8 / self.bits() as usize
    }

    /// Bytes per packed row of `width` pixels.
    #[inline]
    pub fn stride(self, width: usize) -> usize {
        width.div_ceil(self.pixels_per_byte())
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// Where the leftmost pixel of a byte lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelOrder {
    /// Leftmost pixel in the least significant bits (console VRAM layout).
    #[default]
    LowFirst,
    /// Leftmost pixel in the most significant bits (PNG layout).
    HighFirst,
}

impl PixelOrder {
    /// Bit offset of pixel `slot` within its byte.
    #[inline]
    pub(crate) fn shift(self, slot: usize, bits: u8) -> u8 {
        match self {
            Self::LowFirst => slot as u8 * bits,
            Self::HighFirst => (8 - bits) - slot as u8 * bits,
        }
    }
}

impl fmt::Display for PixelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LowFirst => write!(f, "low-first"),
            Self::HighFirst => write!(f, "high-first"),
        }
    }
}

impl FromStr for PixelOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low-first" | "low" | "lsb" => Ok(Self::LowFirst),
            "high-first" | "high" | "msb" => Ok(Self::HighFirst),
            _ => Err(format!(
                "unknown pixel order '{s}' (expected 'low-first' or 'high-first')"
            )),
        }
    }
}
