//! Palette reduction.
//!
//! Reduces an RGBA pixel buffer to at most `Q` representative colors and
//! maps every pixel to one of them. The result is fully deterministic: the
//! same pixels and options always give the same palette and indices.
//!
//! The pipeline is:
//!
//! 1. Build a [`ColorHistogram`] in first-occurrence order.
//! 2. If the image already fits, use its distinct colors verbatim.
//! 3. Otherwise run a population-weighted median cut to `Q` clusters and
//!    refine them with perceptual k-means.
//! 4. Renumber clusters by the first pixel that uses them, merging clusters
//!    whose representatives round to the same color.

mod centroid;
mod histogram;
mod median_cut;
mod options;
mod refine;

pub use histogram::{ColorHistogram, HistogramEntry};
pub use options::{QuantizeOptions, DEFAULT_QUANTIZE_COUNT, DEFAULT_REFINE_ITERATIONS};

use std::collections::HashMap;

use crate::api::EncodeError;
use crate::color::Rgba;
use crate::output::BitDepth;
use crate::palette::Palette;

/// Palette plus one palette index per input pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantized {
    /// Representative colors, ordered by first use.
    pub palette: Palette,
    /// Row-major palette indices, one per input pixel.
    pub indices: Vec<u8>,
}

/// Reduce `pixels` to a palette that fits `bit_depth`.
///
/// # Errors
///
/// - [`EncodeError::InvalidQuantizeCount`] if `options.quantize_count`
///   exceeds `bit_depth.capacity()`.
/// - [`EncodeError::PaletteOverflow`] if `quantize_count` is zero and the
///   image has more distinct colors than the depth can index.
/// - [`EncodeError::EmptyImage`] if `pixels` is empty.
///
/// # Example
///
/// ```
/// use indexed_pack::{quantize, BitDepth, QuantizeOptions, Rgba};
///
/// let red = Rgba::opaque(255, 0, 0);
/// let blue = Rgba::opaque(0, 0, 255);
/// let result = quantize(&[blue, red, red, blue], BitDepth::Four, &QuantizeOptions::default())
///     .unwrap();
///
/// assert_eq!(result.palette.entries(), &[blue, red]);
/// assert_eq!(result.indices, vec![0, 1, 1, 0]);
/// ```
pub fn quantize(
    pixels: &[Rgba],
    bit_depth: BitDepth,
    options: &QuantizeOptions,
) -> Result<Quantized, EncodeError> {
    let capacity = bit_depth.capacity();
    let requested = options.quantize_count;
    if requested > capacity {
        return Err(EncodeError::InvalidQuantizeCount {
            count: requested,
            capacity,
        });
    }
    if pixels.is_empty() {
        return Err(EncodeError::EmptyImage);
    }

    let histogram = ColorHistogram::from_pixels(pixels);
    let entries = histogram.entries();
    let distinct = entries.len();

    let (assignment, clusters) = if requested == 0 && distinct > capacity {
        return Err(EncodeError::PaletteOverflow { distinct, capacity });
    } else if requested == 0 || distinct <= requested {
        ((0..distinct).collect::<Vec<_>>(), distinct)
    } else {
        let (assignment, clusters) = median_cut::median_cut(entries, requested);
        let assignment =
            refine::refine(entries, assignment, clusters, options.refine_iterations);
        (assignment, clusters)
    };

    let sums = refine::cluster_sums(entries, &assignment, clusters);
    let mut cluster_index: Vec<Option<u8>> = vec![None; clusters];
    let mut color_index: HashMap<Rgba, u8> = HashMap::new();
    let mut colors: Vec<Rgba> = Vec::new();
    let mut entry_index: Vec<u8> = Vec::with_capacity(distinct);

    // Entries are in first-occurrence order, so the first entry seen for a
    // cluster is its earliest pixel.
    for &cluster in &assignment {
        let index = match cluster_index[cluster] {
            Some(index) => index,
            None => {
                let color = sums[cluster].mean();
                let index = *color_index.entry(color).or_insert_with(|| {
                    colors.push(color);
                    (colors.len() - 1) as u8
                });
                cluster_index[cluster] = Some(index);
                index
            }
        };
        entry_index.push(index);
    }

    let indices = histogram
        .pixel_entries()
        .iter()
        .map(|&entry| entry_index[entry as usize])
        .collect();
    let palette = Palette::new(colors)?;

    Ok(Quantized { palette, indices })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: usize, height: usize) -> Vec<Rgba> {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(Rgba::opaque(
                    (x * 255 / (width - 1)) as u8,
                    (y * 255 / (height - 1)) as u8,
                    ((x + y) * 255 / (width + height - 2)) as u8,
                ));
            }
        }
        pixels
    }

    #[test]
    fn test_exact_colors_when_few() {
        let a = Rgba::opaque(10, 20, 30);
        let b = Rgba::new(40, 50, 60, 70);
        let c = Rgba::TRANSPARENT;
        let pixels = [c, a, b, a, c, b];
        let result = quantize(&pixels, BitDepth::Four, &QuantizeOptions::default()).unwrap();
        assert_eq!(result.palette.entries(), &[c, a, b]);
        assert_eq!(result.indices, vec![0, 1, 2, 1, 0, 2]);
    }

    #[test]
    fn test_reduces_to_requested_count() {
        let pixels = gradient(32, 32);
        for count in [1, 2, 5, 16] {
            let result =
                quantize(&pixels, BitDepth::Four, &QuantizeOptions::with_count(count)).unwrap();
            assert!(result.palette.len() <= count, "count {count}");
            assert!(result
                .indices
                .iter()
                .all(|&index| (index as usize) < result.palette.len()));
        }
    }

    #[test]
    fn test_first_pixel_gets_index_zero() {
        let pixels = gradient(20, 20);
        let result = quantize(&pixels, BitDepth::Two, &QuantizeOptions::with_count(4)).unwrap();
        assert_eq!(result.indices[0], 0);
    }

    #[test]
    fn test_indices_are_first_use_ordered() {
        let pixels = gradient(24, 24);
        let result = quantize(&pixels, BitDepth::Four, &QuantizeOptions::default()).unwrap();
        let mut next = 0u8;
        for &index in &result.indices {
            assert!(index <= next, "index {index} used before {next}");
            if index == next {
                next += 1;
            }
        }
        assert_eq!(next as usize, result.palette.len());
    }

    #[test]
    fn test_deterministic() {
        let pixels = gradient(40, 30);
        let options = QuantizeOptions::default();
        let first = quantize(&pixels, BitDepth::Four, &options).unwrap();
        let second = quantize(&pixels, BitDepth::Four, &options).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_count_keeps_distinct_colors() {
        let pixels: Vec<Rgba> = (0..16u8).map(|v| Rgba::opaque(v * 16, 0, 0)).collect();
        let result = quantize(&pixels, BitDepth::Four, &QuantizeOptions::with_count(0)).unwrap();
        assert_eq!(result.palette.len(), 16);
        assert_eq!(result.indices, (0..16u8).collect::<Vec<_>>());
    }

    #[test]
    fn test_zero_count_overflow() {
        let pixels: Vec<Rgba> = (0..17u8).map(|v| Rgba::opaque(v, 0, 0)).collect();
        let err = quantize(&pixels, BitDepth::Four, &QuantizeOptions::with_count(0)).unwrap_err();
        assert_eq!(
            err,
            EncodeError::PaletteOverflow {
                distinct: 17,
                capacity: 16
            }
        );
    }

    #[test]
    fn test_count_above_capacity() {
        let err = quantize(
            &[Rgba::TRANSPARENT],
            BitDepth::One,
            &QuantizeOptions::with_count(3),
        )
        .unwrap_err();
        assert_eq!(
            err,
            EncodeError::InvalidQuantizeCount {
                count: 3,
                capacity: 2
            }
        );
    }

    #[test]
    fn test_empty_pixels() {
        let err = quantize(&[], BitDepth::Eight, &QuantizeOptions::default()).unwrap_err();
        assert_eq!(err, EncodeError::EmptyImage);
    }

    #[test]
    fn test_separates_tight_groups() {
        // Two tight groups of grays.
        let mut pixels = Vec::new();
        for i in 0..10u8 {
            pixels.push(Rgba::opaque(i, i, i));
            pixels.push(Rgba::opaque(250 - i, 250 - i, 250 - i));
        }
        let result = quantize(&pixels, BitDepth::One, &QuantizeOptions::with_count(2)).unwrap();
        assert_eq!(result.palette.len(), 2);
        assert_ne!(result.indices[0], result.indices[1]);
        for pair in result.indices.chunks(2) {
            assert_eq!(pair, &result.indices[0..2]);
        }
    }
}
