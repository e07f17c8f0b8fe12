use std::path::PathBuf;

use indexed_pack::{BitDepth, EncodeError, ResampleError};
use thiserror::Error;

/// Classified failure of one conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Decode error: {}: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },

    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid bit depth: {0} (supported: 1, 2, 4, 8)")]
    InvalidBitDepth(u8),

    #[error(
        "Invalid quantize count: {count} exceeds the {capacity} colors of a {bit_depth}-bit index"
    )]
    InvalidQuantizeCount {
        count: usize,
        bit_depth: u8,
        capacity: usize,
    },

    #[error(
        "Palette overflow: {distinct} distinct colors do not fit a {bit_depth}-bit index ({capacity} max)"
    )]
    PaletteOverflow {
        distinct: usize,
        bit_depth: u8,
        capacity: usize,
    },

    #[error("Encoding failure: {0}")]
    EncodingFailure(String),

    #[error("Invalid output paths: {0}")]
    InvalidOutputPaths(String),

    #[error("Invalid assets: {0}")]
    InvalidAssets(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("IO error: {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    /// Classify a quantization or packing failure at `bit_depth`.
    pub fn from_encode(err: EncodeError, bit_depth: BitDepth) -> Self {
        match err {
            EncodeError::InvalidQuantizeCount { count, capacity } => {
                ConvertError::InvalidQuantizeCount {
                    count,
                    bit_depth: bit_depth.bits(),
                    capacity,
                }
            }
            EncodeError::PaletteOverflow { distinct, capacity } => ConvertError::PaletteOverflow {
                distinct,
                bit_depth: bit_depth.bits(),
                capacity,
            },
            other => ConvertError::EncodingFailure(other.to_string()),
        }
    }

    /// Classify a decode or resample failure of the source at `path`.
    pub fn from_resample(err: ResampleError, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match err {
            ResampleError::Io(source) => ConvertError::Io { path, source },
            ResampleError::InvalidDimensions { width, height } => {
                ConvertError::InvalidDimensions { width, height }
            }
            other => ConvertError::Decode {
                path,
                reason: other.to_string(),
            },
        }
    }

    /// Wrap an I/O failure on `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }
}
