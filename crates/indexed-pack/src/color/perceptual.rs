//! Perceptual color with alpha

use super::oklab::Oklab;
use super::rgba::Rgba;

/// An [`Oklab`] color paired with normalized alpha.
///
/// This is the space quantization measures error in. The color term is
/// scaled by the smaller of the two alphas: the hue of a pixel nobody can
/// see does not matter, but how visible it is always does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerceptualColor {
    /// Perceptual color of the (unpremultiplied) channels.
    pub lab: Oklab,
    /// Alpha in 0.0..=1.0.
    pub alpha: f32,
}

impl PerceptualColor {
    /// Distance used for clustering and nearest-entry search.
    ///
    /// `min(alpha_a, alpha_b) * |lab_a - lab_b|² + (alpha_a - alpha_b)²`
    #[inline]
    pub fn distance_squared(self, other: PerceptualColor) -> f32 {
        let visibility = self.alpha.min(other.alpha);
        let da = self.alpha - other.alpha;
        visibility * self.lab.distance_squared(other.lab) + da * da
    }
}

impl From<Rgba> for PerceptualColor {
    #[inline]
    fn from(color: Rgba) -> Self {
        Self {
            lab: Oklab::from(color),
            alpha: color.a as f32 / 255.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invisible_colors_are_equal() {
        let a = PerceptualColor::from(Rgba::new(255, 0, 0, 0));
        let b = PerceptualColor::from(Rgba::new(0, 0, 255, 0));
        assert_eq!(a.distance_squared(b), 0.0);
    }

    #[test]
    fn test_alpha_difference_counts() {
        let opaque = PerceptualColor::from(Rgba::new(0, 0, 0, 255));
        let clear = PerceptualColor::from(Rgba::new(0, 0, 0, 0));
        assert!((opaque.distance_squared(clear) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_opaque_distance_matches_oklab() {
        let a = Rgba::opaque(30, 60, 90);
        let b = Rgba::opaque(90, 60, 30);
        let expected = Oklab::from(a).distance_squared(Oklab::from(b));
        let actual = PerceptualColor::from(a).distance_squared(PerceptualColor::from(b));
        assert!((expected - actual).abs() < 1e-6);
    }

    #[test]
    fn test_closer_color_has_smaller_distance() {
        let base = PerceptualColor::from(Rgba::opaque(100, 100, 100));
        let near = PerceptualColor::from(Rgba::opaque(110, 100, 100));
        let far = PerceptualColor::from(Rgba::opaque(200, 100, 100));
        assert!(base.distance_squared(near) < base.distance_squared(far));
    }
}
