//! Decoded source rasters and fixed-size canonical images.

use std::path::Path;

use image::{ImageReader, RgbaImage};

use super::error::ResampleError;
use crate::color::Rgba;

/// A decoded input image, always held as 8-bit RGBA.
///
/// Formats without an alpha channel decode as fully opaque.
#[derive(Debug, Clone)]
pub struct SourceImage {
    image: RgbaImage,
}

impl SourceImage {
    /// Decode the file at `path`. The format is detected from its contents.
    ///
    /// # Errors
    ///
    /// [`ResampleError::Io`] if the file cannot be read,
    /// [`ResampleError::Decode`] if it is not a supported raster, and
    /// [`ResampleError::EmptySource`] if it has no pixels.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ResampleError> {
        let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
        Self::from_rgba_image(image.to_rgba8())
    }

    /// Decode an in-memory PNG or JPEG.
    pub fn from_memory(bytes: &[u8]) -> Result<Self, ResampleError> {
        let image = image::load_from_memory(bytes)?;
        Self::from_rgba_image(image.to_rgba8())
    }

    /// Wrap raw RGBA bytes, four per pixel, row-major.
    pub fn from_rgba(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self, ResampleError> {
        let expected = width as usize * height as usize * 4;
        let actual = bytes.len();
        let image = RgbaImage::from_raw(width, height, bytes)
            .ok_or(ResampleError::BufferSize { expected, actual })?;
        Self::from_rgba_image(image)
    }

    fn from_rgba_image(image: RgbaImage) -> Result<Self, ResampleError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(ResampleError::EmptySource { width, height });
        }
        Ok(Self { image })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The decoded pixels.
    #[inline]
    pub fn as_rgba_image(&self) -> &RgbaImage {
        &self.image
    }
}

/// An RGBA raster at its final output size, ready for quantization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalImage {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl CanonicalImage {
    /// Build from row-major pixels.
    ///
    /// # Errors
    ///
    /// [`ResampleError::InvalidDimensions`] for a zero dimension,
    /// [`ResampleError::BufferSize`] if `pixels` does not hold exactly
    /// `width * height` entries.
    pub fn new(width: u32, height: u32, pixels: Vec<Rgba>) -> Result<Self, ResampleError> {
        if width == 0 || height == 0 {
            return Err(ResampleError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(ResampleError::BufferSize {
                expected: expected * 4,
                actual: pixels.len() * 4,
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Use a source image as-is, without resampling.
    pub fn from_source(source: &SourceImage) -> Self {
        Self::from_rgba_image(source.as_rgba_image())
    }

    pub(crate) fn from_rgba_image(image: &RgbaImage) -> Self {
        let pixels = image.pixels().map(|p| Rgba::from_bytes(p.0)).collect();
        Self {
            width: image.width(),
            height: image.height(),
            pixels,
        }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major pixels.
    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Copy into an `image` buffer, e.g. for writing a PNG.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let bytes = self.pixels.iter().flat_map(|p| p.to_bytes()).collect();
        // Dimensions and length are checked on construction.
        RgbaImage::from_raw(self.width, self.height, bytes)
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }
}
