//! Alpha-weighted color averaging.

use crate::color::Rgba;

/// Running sum for the representative color of a cluster.
///
/// Color channels are weighted by alpha so invisible pixels do not drag a
/// cluster's hue around; alpha itself is a plain pixel-count average. When
/// every member is fully transparent the color channels fall back to a
/// plain average, which keeps single-color clusters exact.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ColorSum {
    weighted: [u64; 3],
    plain: [u64; 3],
    alpha: u64,
    count: u64,
}

impl ColorSum {
    /// Add `count` pixels of `color`.
    #[inline]
    pub(crate) fn add(&mut self, color: Rgba, count: u32) {
        let n = count as u64;
        let a = color.a as u64;
        for (channel, value) in [color.r, color.g, color.b].into_iter().enumerate() {
            self.weighted[channel] += value as u64 * a * n;
            self.plain[channel] += value as u64 * n;
        }
        self.alpha += a * n;
        self.count += n;
    }

    /// Number of pixels added so far.
    #[inline]
    pub(crate) fn count(&self) -> u64 {
        self.count
    }

    /// Rounded mean color, or transparent black for an empty sum.
    pub(crate) fn mean(&self) -> Rgba {
        if self.count == 0 {
            return Rgba::TRANSPARENT;
        }
        let (sums, divisor) = if self.alpha > 0 {
            (self.weighted, self.alpha)
        } else {
            (self.plain, self.count)
        };
        let channel = |sum: u64| ((sum + divisor / 2) / divisor).min(255) as u8;
        Rgba::new(
            channel(sums[0]),
            channel(sums[1]),
            channel(sums[2]),
            ((self.alpha + self.count / 2) / self.count).min(255) as u8,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_mean() {
        assert_eq!(ColorSum::default().mean(), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_single_color_is_exact() {
        for color in [
            Rgba::opaque(13, 200, 77),
            Rgba::new(13, 200, 77, 3),
            Rgba::new(13, 200, 77, 0),
        ] {
            let mut sum = ColorSum::default();
            sum.add(color, 17);
            assert_eq!(sum.mean(), color);
        }
    }

    #[test]
    fn test_weighted_by_count() {
        let mut sum = ColorSum::default();
        sum.add(Rgba::opaque(0, 0, 0), 3);
        sum.add(Rgba::opaque(200, 200, 200), 1);
        assert_eq!(sum.mean(), Rgba::opaque(50, 50, 50));
        assert_eq!(sum.count(), 4);
    }

    #[test]
    fn test_transparent_members_do_not_tint() {
        let mut sum = ColorSum::default();
        sum.add(Rgba::opaque(255, 0, 0), 1);
        sum.add(Rgba::new(0, 0, 255, 0), 1);
        let mean = sum.mean();
        assert_eq!((mean.r, mean.g, mean.b), (255, 0, 0));
        assert_eq!(mean.a, 128);
    }
}
