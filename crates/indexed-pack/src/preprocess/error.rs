use std::fmt;

/// Errors from decoding or resampling a source image.
#[derive(Debug)]
pub enum ResampleError {
    /// The bytes could not be decoded as a supported raster format.
    Decode(String),
    /// The source file could not be read.
    Io(std::io::Error),
    /// The source decoded to an image with no pixels.
    EmptySource {
        /// Decoded width.
        width: u32,
        /// Decoded height.
        height: u32,
    },
    /// A requested output dimension was zero.
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// A raw pixel buffer did not match its stated dimensions.
    BufferSize {
        /// Bytes implied by the dimensions.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },
}

impl fmt::Display for ResampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResampleError::Decode(reason) => write!(f, "failed to decode image: {}", reason),
            ResampleError::Io(e) => write!(f, "failed to read image: {}", e),
            ResampleError::EmptySource { width, height } => {
                write!(f, "source image is empty ({}x{})", width, height)
            }
            ResampleError::InvalidDimensions { width, height } => {
                write!(f, "invalid target dimensions {}x{}", width, height)
            }
            ResampleError::BufferSize { expected, actual } => {
                write!(
                    f,
                    "pixel buffer holds {} bytes, dimensions need {}",
                    actual, expected
                )
            }
        }
    }
}

impl std::error::Error for ResampleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResampleError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ResampleError {
    fn from(e: std::io::Error) -> Self {
        ResampleError::Io(e)
    }
}

impl From<image::ImageError> for ResampleError {
    fn from(e: image::ImageError) -> Self {
        ResampleError::Decode(e.to_string())
    }
}
