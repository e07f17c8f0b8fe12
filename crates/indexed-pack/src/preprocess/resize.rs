//! Lanczos3 resampling to the canonical output size.

use std::fmt;
use std::str::FromStr;

use image::imageops::{self, FilterType};
use image::RgbaImage;

use super::error::ResampleError;
use super::source::{CanonicalImage, SourceImage};
use crate::color::Rgba;

/// How a source with a different aspect ratio is mapped onto the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeMode {
    /// Scale each axis independently to exactly the target size.
    #[default]
    Stretch,
    /// Scale to fit inside the target, keeping aspect ratio, and pad the
    /// remaining border with a solid color.
    Fit,
    /// Scale to cover the target, keeping aspect ratio, and crop the
    /// overflow evenly from both sides.
    Crop,
}

impl ResizeMode {
    /// All modes, default first.
    pub const ALL: [ResizeMode; 3] = [ResizeMode::Stretch, ResizeMode::Fit, ResizeMode::Crop];
}

impl fmt::Display for ResizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResizeMode::Stretch => write!(f, "stretch"),
            ResizeMode::Fit => write!(f, "fit"),
            ResizeMode::Crop => write!(f, "crop"),
        }
    }
}

impl FromStr for ResizeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stretch" => Ok(ResizeMode::Stretch),
            "fit" | "fit-pad" => Ok(ResizeMode::Fit),
            "crop" | "crop-center" => Ok(ResizeMode::Crop),
            _ => Err(format!(
                "unknown resize mode '{s}' (expected 'stretch', 'fit' or 'crop')"
            )),
        }
    }
}

/// Resample `source` to exactly `width` x `height`.
///
/// All four channels go through the Lanczos3 filter. A source already at
/// the target size is copied unchanged, so images authored at the final
/// resolution keep their exact colors. `pad_color` is only used by
/// [`ResizeMode::Fit`].
///
/// # Errors
///
/// [`ResampleError::InvalidDimensions`] if either target dimension is zero.
pub fn resample(
    source: &SourceImage,
    width: u32,
    height: u32,
    mode: ResizeMode,
    pad_color: Rgba,
) -> Result<CanonicalImage, ResampleError> {
    if width == 0 || height == 0 {
        return Err(ResampleError::InvalidDimensions { width, height });
    }
    let image = source.as_rgba_image();
    if image.dimensions() == (width, height) {
        return Ok(CanonicalImage::from_source(source));
    }

    let (src_w, src_h) = (image.width() as f32, image.height() as f32);
    let (target_w, target_h) = (width as f32, height as f32);

    let resized = match mode {
        ResizeMode::Stretch => imageops::resize(image, width, height, FilterType::Lanczos3),
        ResizeMode::Fit => {
            let scale = (target_w / src_w).min(target_h / src_h);
            let new_w = ((src_w * scale).round() as u32).clamp(1, width);
            let new_h = ((src_h * scale).round() as u32).clamp(1, height);
            let scaled = imageops::resize(image, new_w, new_h, FilterType::Lanczos3);

            let mut padded = RgbaImage::from_pixel(width, height, image::Rgba(pad_color.to_bytes()));
            let offset_x = (width - new_w) / 2;
            let offset_y = (height - new_h) / 2;
            imageops::replace(&mut padded, &scaled, offset_x as i64, offset_y as i64);
            padded
        }
        ResizeMode::Crop => {
            let scale = (target_w / src_w).max(target_h / src_h);
            let new_w = ((src_w * scale).round() as u32).max(width);
            let new_h = ((src_h * scale).round() as u32).max(height);
            let scaled = imageops::resize(image, new_w, new_h, FilterType::Lanczos3);

            let crop_x = (new_w - width) / 2;
            let crop_y = (new_h - height) / 2;
            imageops::crop_imm(&scaled, crop_x, crop_y, width, height).to_image()
        }
    };

    Ok(CanonicalImage::from_rgba_image(&resized))
}
