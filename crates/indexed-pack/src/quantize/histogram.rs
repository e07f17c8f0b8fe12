//! Distinct-color histogram in first-occurrence order.

use std::collections::HashMap;

use crate::color::Rgba;

/// One distinct color and how many pixels carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramEntry {
    /// The color.
    pub color: Rgba,
    /// Number of pixels with exactly this color.
    pub count: u32,
}

/// Distinct colors of a pixel buffer.
///
/// Entries are ordered by the row-major position of the first pixel that
/// carries them. Everything downstream that needs a tie-break uses this
/// order, which is what makes quantization reproducible.
///
/// # Example
///
/// ```
/// use indexed_pack::{ColorHistogram, Rgba};
///
/// let red = Rgba::opaque(255, 0, 0);
/// let blue = Rgba::opaque(0, 0, 255);
/// let histogram = ColorHistogram::from_pixels(&[blue, red, blue]);
///
/// assert_eq!(histogram.len(), 2);
/// assert_eq!(histogram.entries()[0].color, blue);
/// assert_eq!(histogram.entries()[0].count, 2);
/// assert_eq!(histogram.pixel_entries(), &[0, 1, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct ColorHistogram {
    entries: Vec<HistogramEntry>,
    pixel_entries: Vec<u32>,
}

impl ColorHistogram {
    /// Count the distinct colors of `pixels`.
    pub fn from_pixels(pixels: &[Rgba]) -> Self {
        let mut lookup: HashMap<Rgba, u32> = HashMap::new();
        let mut entries: Vec<HistogramEntry> = Vec::new();
        let mut pixel_entries = Vec::with_capacity(pixels.len());

        for &color in pixels {
            let index = *lookup.entry(color).or_insert_with(|| {
                entries.push(HistogramEntry { color, count: 0 });
                (entries.len() - 1) as u32
            });
            entries[index as usize].count += 1;
            pixel_entries.push(index);
        }

        Self {
            entries,
            pixel_entries,
        }
    }

    /// Number of distinct colors.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no pixels were counted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct colors in first-occurrence order.
    #[inline]
    pub fn entries(&self) -> &[HistogramEntry] {
        &self.entries
    }

    /// For every input pixel, the index of its entry.
    #[inline]
    pub fn pixel_entries(&self) -> &[u32] {
        &self.pixel_entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let histogram = ColorHistogram::from_pixels(&[]);
        assert!(histogram.is_empty());
        assert!(histogram.pixel_entries().is_empty());
    }

    #[test]
    fn test_first_occurrence_order() {
        let a = Rgba::opaque(1, 1, 1);
        let b = Rgba::opaque(2, 2, 2);
        let c = Rgba::opaque(3, 3, 3);
        let histogram = ColorHistogram::from_pixels(&[c, a, c, b, a, c]);

        let colors: Vec<Rgba> = histogram.entries().iter().map(|e| e.color).collect();
        assert_eq!(colors, vec![c, a, b]);

        let counts: Vec<u32> = histogram.entries().iter().map(|e| e.count).collect();
        assert_eq!(counts, vec![3, 2, 1]);

        assert_eq!(histogram.pixel_entries(), &[0, 1, 0, 2, 1, 0]);
    }

    #[test]
    fn test_alpha_distinguishes_colors() {
        let histogram =
            ColorHistogram::from_pixels(&[Rgba::new(5, 5, 5, 255), Rgba::new(5, 5, 5, 0)]);
        assert_eq!(histogram.len(), 2);
    }
}
