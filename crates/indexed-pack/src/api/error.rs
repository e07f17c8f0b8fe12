//! Unified error type for the indexed-pack public API.

use crate::output::PackError;
use crate::palette::PaletteError;
use std::fmt;

/// Error returned by quantization and [`IndexedEncoder`](crate::IndexedEncoder).
///
/// # Example
///
/// ```
/// use indexed_pack::{BitDepth, EncodeError, IndexedEncoder};
///
/// fn sixteen_colors() -> Result<IndexedEncoder, EncodeError> {
///     IndexedEncoder::new(BitDepth::Four).quantize_count(16).validated()
/// }
/// assert!(sixteen_colors().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum EncodeError {
    /// The requested palette size is larger than the bit depth can index.
    InvalidQuantizeCount {
        /// Requested palette size.
        count: usize,
        /// Entries addressable at the bit depth.
        capacity: usize,
    },
    /// Quantization was disabled but the image has too many colors.
    PaletteOverflow {
        /// Distinct colors found.
        distinct: usize,
        /// Entries addressable at the bit depth.
        capacity: usize,
    },
    /// The image has no pixels.
    EmptyImage,
    /// Palette construction failed.
    Palette(PaletteError),
    /// Packing the indices failed.
    Pack(PackError),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::InvalidQuantizeCount { count, capacity } => write!(
                f,
                "quantize count {} exceeds the {} entries the bit depth can index",
                count, capacity
            ),
            EncodeError::PaletteOverflow { distinct, capacity } => write!(
                f,
                "image has {} distinct colors but the bit depth indexes only {}",
                distinct, capacity
            ),
            EncodeError::EmptyImage => write!(f, "image has no pixels"),
            EncodeError::Palette(err) => write!(f, "palette error: {}", err),
            EncodeError::Pack(err) => write!(f, "packing error: {}", err),
        }
    }
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EncodeError::Palette(err) => Some(err),
            EncodeError::Pack(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PaletteError> for EncodeError {
    fn from(err: PaletteError) -> Self {
        EncodeError::Palette(err)
    }
}

impl From<PackError> for EncodeError {
    fn from(err: PackError) -> Self {
        EncodeError::Pack(err)
    }
}
