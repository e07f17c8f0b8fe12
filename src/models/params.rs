use std::path::{Path, PathBuf};

use indexed_pack::BitDepth;

use crate::error::ConvertError;

/// Bit depth and palette size, validated against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeSettings {
    pub bit_depth: BitDepth,
    /// Upper bound on palette entries; zero disables quantization.
    pub quantize_count: usize,
}

impl EncodeSettings {
    /// Validate a raw bit count and palette size.
    pub fn new(bit_depth: u8, quantize_count: usize) -> Result<Self, ConvertError> {
        let depth = BitDepth::from_bits(bit_depth).ok_or(ConvertError::InvalidBitDepth(bit_depth))?;
        if quantize_count > depth.capacity() {
            return Err(ConvertError::InvalidQuantizeCount {
                count: quantize_count,
                bit_depth,
                capacity: depth.capacity(),
            });
        }
        Ok(Self {
            bit_depth: depth,
            quantize_count,
        })
    }
}

/// Raw caller input for a full conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionParams {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub quantize: usize,
    pub source: PathBuf,
    pub image_out: PathBuf,
    pub palette_out: PathBuf,
}

impl ConversionParams {
    /// Check every parameter before any file is touched.
    ///
    /// Order: dimensions, bit depth, quantize count, output paths.
    pub fn validate(&self) -> Result<ConversionRequest, ConvertError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConvertError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let settings = EncodeSettings::new(self.bit_depth, self.quantize)?;
        validate_paths(&self.source, &self.image_out, &self.palette_out)?;

        Ok(ConversionRequest {
            width: self.width,
            height: self.height,
            settings,
            source: self.source.clone(),
            image_out: self.image_out.clone(),
            palette_out: self.palette_out.clone(),
        })
    }
}

/// A conversion whose parameters have passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    width: u32,
    height: u32,
    settings: EncodeSettings,
    source: PathBuf,
    image_out: PathBuf,
    palette_out: PathBuf,
}

impl ConversionRequest {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn settings(&self) -> EncodeSettings {
        self.settings
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn image_out(&self) -> &Path {
        &self.image_out
    }

    pub fn palette_out(&self) -> &Path {
        &self.palette_out
    }
}

/// Raw input of the encode command: no resampling, so no dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeParams {
    pub bit_depth: u8,
    pub quantize: usize,
    pub source: PathBuf,
    pub image_out: PathBuf,
    pub palette_out: PathBuf,
}

impl EncodeParams {
    pub fn validate(&self) -> Result<EncodeRequest, ConvertError> {
        let settings = EncodeSettings::new(self.bit_depth, self.quantize)?;
        validate_paths(&self.source, &self.image_out, &self.palette_out)?;
        Ok(EncodeRequest {
            settings,
            source: self.source.clone(),
            image_out: self.image_out.clone(),
            palette_out: self.palette_out.clone(),
        })
    }
}

/// A validated encode command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeRequest {
    settings: EncodeSettings,
    source: PathBuf,
    image_out: PathBuf,
    palette_out: PathBuf,
}

impl EncodeRequest {
    pub fn settings(&self) -> EncodeSettings {
        self.settings
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn image_out(&self) -> &Path {
        &self.image_out
    }

    pub fn palette_out(&self) -> &Path {
        &self.palette_out
    }
}

fn validate_paths(source: &Path, image_out: &Path, palette_out: &Path) -> Result<(), ConvertError> {
    if same_location(image_out, palette_out) {
        return Err(ConvertError::InvalidOutputPaths(format!(
            "image and palette both write to {}",
            image_out.display()
        )));
    }
    for out in [image_out, palette_out] {
        if same_location(out, source) {
            return Err(ConvertError::InvalidOutputPaths(format!(
                "{} would overwrite the source image",
                out.display()
            )));
        }
    }
    Ok(())
}

/// Whether two paths name the same directory entry.
///
/// Parent directories are compared after resolving them, so `./bg.png`,
/// `bg.png` and `out/../bg.png` all match. The file name itself is not
/// followed through symlinks: replacing a link never touches its target.
fn same_location(a: &Path, b: &Path) -> bool {
    a == b || matches!((resolve_parent(a), resolve_parent(b)), (Some(x), Some(y)) if x == y)
}

fn resolve_parent(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?;
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Some(parent.canonicalize().ok()?.join(name))
}
