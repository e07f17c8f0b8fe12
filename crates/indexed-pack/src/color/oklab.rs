//! Oklab perceptual color space
//!
//! Oklab is a perceptual color space designed for uniform color perception.
//! Quantization uses it to measure how far a pixel is from a palette entry.
//!
//! # References
//!
//! Björn Ottosson, "A perceptual color space for image processing"
//! <https://bottosson.github.io/posts/oklab/>

use super::linear_rgb::LinearRgb;
use super::rgba::Rgba;

/// A color in Oklab perceptual color space.
///
/// # Components
///
/// - `l`: Lightness (0.0 = black, 1.0 = white for in-gamut colors)
/// - `a`: Green-red axis (negative = green, positive = red)
/// - `b`: Blue-yellow axis (negative = blue, positive = yellow)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklab {
    /// Lightness: 0.0 (black) to 1.0 (white) for in-gamut colors
    pub l: f32,
    /// Green-red axis: typically -0.5 to 0.5
    pub a: f32,
    /// Blue-yellow axis: typically -0.5 to 0.5
    pub b: f32,
}

impl Oklab {
    /// Create a new Oklab color.
    #[inline]
    pub fn new(l: f32, a: f32, b: f32) -> Self {
        Self { l, a, b }
    }

    /// Squared Euclidean distance in Oklab space.
    ///
    /// Use squared distance to avoid sqrt when comparing distances.
    ///
    /// # Example
    ///
    /// ```
    /// use indexed_pack::Oklab;
    ///
    /// let white = Oklab::new(1.0, 0.0, 0.0);
    /// let black = Oklab::new(0.0, 0.0, 0.0);
    /// let gray = Oklab::new(0.5, 0.0, 0.0);
    ///
    /// // Gray is equidistant from black and white
    /// let d_to_black = gray.distance_squared(black);
    /// let d_to_white = gray.distance_squared(white);
    /// assert!((d_to_black - d_to_white).abs() < 1e-6);
    /// ```
    #[inline]
    pub fn distance_squared(self, other: Oklab) -> f32 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        dl * dl + da * da + db * db
    }
}

impl From<LinearRgb> for Oklab {
    /// Convert from linear RGB to Oklab.
    ///
    /// Uses the updated 2021-01-25 matrices from Björn Ottosson.
    fn from(rgb: LinearRgb) -> Self {
        // Step 1: Linear sRGB to LMS (M1 matrix)
        let l = 0.4122214708 * rgb.r + 0.5363325363 * rgb.g + 0.0514459929 * rgb.b;
        let m = 0.2119034982 * rgb.r + 0.6806995451 * rgb.g + 0.1073969566 * rgb.b;
        let s = 0.0883024619 * rgb.r + 0.2817188376 * rgb.g + 0.6299787005 * rgb.b;

        // Step 2: Cube root (nonlinearity)
        let l_ = l.cbrt();
        let m_ = m.cbrt();
        let s_ = s.cbrt();

        // Step 3: LMS to Lab (M2 matrix)
        Oklab {
            l: 0.2104542553 * l_ + 0.7936177850 * m_ - 0.0040720468 * s_,
            a: 1.9779984951 * l_ - 2.4285922050 * m_ + 0.4505937099 * s_,
            b: 0.0259040371 * l_ + 0.7827717662 * m_ - 0.8086757660 * s_,
        }
    }
}

impl From<Rgba> for Oklab {
    #[inline]
    fn from(color: Rgba) -> Self {
        Oklab::from(LinearRgb::from(color))
    }
}
