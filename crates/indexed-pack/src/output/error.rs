use std::fmt;

/// Errors from packing or unpacking a bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackError {
    /// Buffer length does not match the image dimensions.
    LengthMismatch {
        /// Length implied by width, height and depth.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },
    /// A palette index does not fit the bit depth.
    IndexOutOfRange {
        /// The offending index.
        index: u8,
        /// Number of indices the depth can hold.
        capacity: usize,
    },
    /// A palette index points past the end of the palette.
    MissingPaletteEntry {
        /// The offending index.
        index: u8,
        /// Number of palette entries.
        palette_len: usize,
    },
}

impl fmt::Display for PackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackError::LengthMismatch { expected, actual } => {
                write!(f, "expected {} bytes of pixel data, got {}", expected, actual)
            }
            PackError::IndexOutOfRange { index, capacity } => {
                write!(
                    f,
                    "palette index {} does not fit a {}-entry bit depth",
                    index, capacity
                )
            }
            PackError::MissingPaletteEntry { index, palette_len } => {
                write!(
                    f,
                    "palette index {} is past the end of a {}-entry palette",
                    index, palette_len
                )
            }
        }
    }
}

impl std::error::Error for PackError {}
