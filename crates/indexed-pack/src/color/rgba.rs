//! 8-bit RGBA pixel type
//!
//! [`Rgba`] is the storage representation used everywhere pixels are held:
//! canonical images, histograms and palette entries.

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// An 8-bit-per-channel color with straight (non-premultiplied) alpha.
///
/// Field order doubles as the byte order of [`to_bytes`](Rgba::to_bytes),
/// which is also the layout of an `rgba8888` palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel (0 = fully transparent, 255 = fully opaque)
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    /// Create a color from its four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color.
    ///
    /// # Example
    /// ```
    /// use indexed_pack::Rgba;
    /// let red = Rgba::opaque(255, 0, 0);
    /// assert_eq!(red.a, 255);
    /// ```
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color from a byte array `[R, G, B, A]`.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    /// Convert to a byte array `[R, G, B, A]`.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Channel value by position (0 = R, 1 = G, 2 = B, 3 = A).
    ///
    /// # Panics
    ///
    /// Panics if `channel > 3`.
    #[inline]
    pub fn channel(self, channel: usize) -> u8 {
        match channel {
            0 => self.r,
            1 => self.g,
            2 => self.b,
            3 => self.a,
            _ => panic!("channel index {channel} out of range 0..=3"),
        }
    }

    /// Returns true if the color has no visible contribution.
    #[inline]
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02X}{:02X}{:02X}{:02X}",
            self.r, self.g, self.b, self.a
        )
    }
}

impl FromStr for Rgba {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Supports the following formats (hash optional):
    /// - `#RRGGBBAA` - explicit alpha
    /// - `#RRGGBB` - opaque
    /// - `#RGB` - shorthand, each digit expanded (opaque)
    ///
    /// Parsing is case-insensitive. Leading and trailing whitespace is trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed_pack::Rgba;
    ///
    /// let white: Rgba = "#FFF".parse().unwrap();
    /// assert_eq!(white, Rgba::opaque(255, 255, 255));
    ///
    /// let clear: Rgba = "#00000000".parse().unwrap();
    /// assert!(clear.is_transparent());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                // Shorthand: expand each digit by multiplying by 17 (0xF -> 0xFF)
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::opaque(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::opaque(r, g, b))
            }
            8 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                let a = u8::from_str_radix(&s[6..8], 16)?;
                Ok(Self::new(r, g, b, a))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
