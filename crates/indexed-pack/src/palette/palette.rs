//! Ordered palette with nearest-color matching.
//!
//! The index of an entry is its identifier in the packed bitmap, so the
//! entry order is part of the output contract.

use std::collections::HashSet;

use super::error::PaletteError;
use super::format::PaletteLayout;
use crate::color::{PerceptualColor, Rgba};

/// An ordered, duplicate-free color table.
///
/// Perceptual coordinates are computed once at construction so that
/// nearest-color queries only do arithmetic.
///
/// # Example
///
/// ```
/// use indexed_pack::{Palette, Rgba};
///
/// let palette = Palette::new(vec![Rgba::opaque(0, 0, 0), Rgba::opaque(255, 255, 255)]).unwrap();
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.find_nearest(Rgba::opaque(30, 30, 30)), 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    entries: Vec<Rgba>,
    perceptual: Vec<PerceptualColor>,
}

impl Palette {
    /// Create a palette from colors in index order.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::EmptyPalette`] if `entries` is empty
    /// - [`PaletteError::DuplicateColor`] if a color appears twice
    pub fn new(entries: Vec<Rgba>) -> Result<Self, PaletteError> {
        if entries.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }

        let mut seen = HashSet::with_capacity(entries.len());
        for (index, color) in entries.iter().enumerate() {
            if !seen.insert(*color) {
                return Err(PaletteError::DuplicateColor { index });
            }
        }

        let perceptual = entries.iter().map(|&c| PerceptualColor::from(c)).collect();
        Ok(Self {
            entries,
            perceptual,
        })
    }

    /// Returns the number of colors in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the palette is empty.
    ///
    /// Always `false`: empty palettes are rejected at construction time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Color at `index`, if any.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Rgba> {
        self.entries.get(index).copied()
    }

    /// All entries in index order.
    #[inline]
    pub fn entries(&self) -> &[Rgba] {
        &self.entries
    }

    /// Index of the perceptually nearest entry.
    ///
    /// Linear scan; on equal distance the lower index wins, which keeps
    /// the result independent of floating point noise between runs.
    pub fn find_nearest(&self, color: Rgba) -> usize {
        let target = PerceptualColor::from(color);
        let mut best_idx = 0;
        let mut best_dist = f32::MAX;

        for (i, &entry) in self.perceptual.iter().enumerate() {
            let dist = target.distance_squared(entry);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }

        best_idx
    }

    /// Serialize the palette according to `layout`.
    pub fn to_bytes(&self, layout: &PaletteLayout) -> Vec<u8> {
        let entry_size = layout.format.entry_size();
        let total = layout.pad_to.unwrap_or(0).max(self.entries.len());
        let mut out = Vec::with_capacity(total * entry_size);

        for &color in &self.entries {
            layout
                .format
                .encode_entry(color, layout.alpha_cutoff, &mut out);
        }
        out.resize(total * entry_size, 0);
        out
    }
}
