//! Error types for palette operations
//!
//! This module provides error types for color parsing, palette validation
//! and palette file decoding.

use std::fmt;
use std::num::ParseIntError;

/// Error type for parsing hex color strings.
///
/// Returned when parsing a hex color string fails, either due to
/// invalid length or invalid hexadecimal characters.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3, 6 or 8 characters after stripping '#')
    InvalidLength,
    /// Invalid hexadecimal character encountered
    InvalidHex(ParseIntError),
}

impl From<ParseIntError> for ParseColorError {
    fn from(err: ParseIntError) -> Self {
        ParseColorError::InvalidHex(err)
    }
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::InvalidLength => {
                write!(f, "invalid hex color length (expected 3, 6 or 8 characters)")
            }
            ParseColorError::InvalidHex(err) => {
                write!(f, "invalid hex character: {}", err)
            }
        }
    }
}

impl std::error::Error for ParseColorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseColorError::InvalidHex(err) => Some(err),
            _ => None,
        }
    }
}

/// Error type for palette validation and decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteError {
    /// No colors provided in palette
    EmptyPalette,
    /// Duplicate color found at the specified index
    DuplicateColor {
        /// Index where the duplicate was found
        index: usize,
    },
    /// Serialized palette length is not a whole number of entries
    InvalidLength {
        /// Length of the serialized data in bytes
        len: usize,
        /// Size of one serialized entry in bytes
        entry_size: usize,
    },
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::EmptyPalette => {
                write!(f, "palette cannot be empty")
            }
            PaletteError::DuplicateColor { index } => {
                write!(f, "duplicate color found at index {}", index)
            }
            PaletteError::InvalidLength { len, entry_size } => {
                write!(
                    f,
                    "palette data of {} bytes is not a multiple of the {}-byte entry size",
                    len, entry_size
                )
            }
        }
    }
}

impl std::error::Error for PaletteError {}
