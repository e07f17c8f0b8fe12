//! Linear RGB color type
//!
//! Linear RGB is the color space where light addition is physically accurate.
//! It is the stepping stone between stored 8-bit pixels and Oklab.

use super::lut::srgb8_to_linear;
use super::rgba::Rgba;

/// A color in linear RGB color space.
///
/// Values represent light intensity proportional to physical light power,
/// in the range 0.0..=1.0 for colors decoded from 8-bit pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    /// Red channel (linear light intensity)
    pub r: f32,
    /// Green channel (linear light intensity)
    pub g: f32,
    /// Blue channel (linear light intensity)
    pub b: f32,
}

impl LinearRgb {
    /// Create a new LinearRgb color from linear RGB values.
    #[inline]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgba> for LinearRgb {
    /// Gamma-decode the color channels of an 8-bit pixel.
    ///
    /// Alpha is not part of the result; callers that care about
    /// transparency carry it separately (see `PerceptualColor`).
    fn from(color: Rgba) -> Self {
        Self {
            r: srgb8_to_linear(color.r),
            g: srgb8_to_linear(color.g),
            b: srgb8_to_linear(color.b),
        }
    }
}
