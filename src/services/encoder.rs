use std::path::{Path, PathBuf};
use std::process::Command;

use indexed_pack::{CanonicalImage, IndexedEncoder, PackedBitmap, PaletteFormat, PixelOrder};

use crate::error::ConvertError;
use crate::models::{ConversionOptions, EncodeSettings};

/// The two payloads produced for one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPair {
    /// Packed palette indices.
    pub image_data: Vec<u8>,
    /// Serialized palette.
    pub palette_data: Vec<u8>,
    /// Number of palette entries written, padding included.
    pub palette_entries: usize,
}

/// Turns a canonical image into an image/palette pair.
///
/// Implementations either quantize in-process or delegate to an external
/// tool; callers cannot tell the difference.
pub trait AssetEncoder: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Encode `image` at the given depth and palette size.
    fn encode(
        &self,
        image: &CanonicalImage,
        settings: EncodeSettings,
    ) -> Result<EncodedPair, ConvertError>;
}

/// Encoder backed by the indexed-pack library.
pub struct InProcessEncoder {
    options: ConversionOptions,
}

impl InProcessEncoder {
    pub fn new(options: ConversionOptions) -> Self {
        Self { options }
    }
}

impl AssetEncoder for InProcessEncoder {
    fn name(&self) -> &str {
        "in-process"
    }

    fn encode(
        &self,
        image: &CanonicalImage,
        settings: EncodeSettings,
    ) -> Result<EncodedPair, ConvertError> {
        let encoder = IndexedEncoder::new(settings.bit_depth)
            .quantize_count(settings.quantize_count)
            .refine_iterations(self.options.refine_iterations)
            .pixel_order(self.options.pixel_order)
            .palette_format(self.options.palette_format)
            .alpha_cutoff(self.options.alpha_cutoff)
            .pad_palette(self.options.pad_palette);

        let assets = encoder
            .encode(image)
            .map_err(|e| ConvertError::from_encode(e, settings.bit_depth))?;
        let palette_entries = assets.palette_bytes.len() / self.options.palette_format.entry_size();

        tracing::debug!(
            colors = assets.palette.len(),
            palette_entries,
            image_bytes = assets.bitmap.as_bytes().len(),
            "Quantized and packed"
        );

        Ok(EncodedPair {
            image_data: assets.bitmap.into_bytes(),
            palette_data: assets.palette_bytes,
            palette_entries,
        })
    }
}

/// Encoder that runs a separate program.
///
/// The program is called as
/// `program [args...] -b <B> [-q <Q>] <input.png> <image_out> <palette_out>`,
/// with `-q` left out when quantization is disabled. It must exit with
/// status 0 and write both outputs. The staged input and both outputs live
/// in a private temporary directory that is removed on every exit path.
pub struct ExternalEncoder {
    program: PathBuf,
    args: Vec<String>,
    palette_format: PaletteFormat,
    pixel_order: PixelOrder,
    pad_palette: bool,
}

impl ExternalEncoder {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            palette_format: PaletteFormat::default(),
            pixel_order: PixelOrder::default(),
            pad_palette: false,
        }
    }

    /// Entry format the program writes, used to count palette entries.
    pub fn palette_format(mut self, format: PaletteFormat) -> Self {
        self.palette_format = format;
        self
    }

    /// In-byte pixel order the program writes, used to read indices back.
    pub fn pixel_order(mut self, order: PixelOrder) -> Self {
        self.pixel_order = order;
        self
    }

    /// Whether the program pads its palette to 2^B entries.
    pub fn pad_palette(mut self, pad: bool) -> Self {
        self.pad_palette = pad;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command(&self, settings: EncodeSettings, input: &Path, image: &Path, palette: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command.arg("-b").arg(settings.bit_depth.bits().to_string());
        if settings.quantize_count > 0 {
            command.arg("-q").arg(settings.quantize_count.to_string());
        }
        command.arg(input).arg(image).arg(palette);
        command
    }
}

impl AssetEncoder for ExternalEncoder {
    fn name(&self) -> &str {
        "external"
    }

    fn encode(
        &self,
        image: &CanonicalImage,
        settings: EncodeSettings,
    ) -> Result<EncodedPair, ConvertError> {
        let staging = tempfile::Builder::new()
            .prefix("bgpack-")
            .tempdir()
            .map_err(|e| ConvertError::io(std::env::temp_dir(), e))?;
        let input = staging.path().join("canonical.png");
        let image_out = staging.path().join("image.bin");
        let palette_out = staging.path().join("palette.bin");

        image
            .to_rgba_image()
            .save_with_format(&input, image::ImageFormat::Png)
            .map_err(|e| ConvertError::EncodingFailure(format!("failed to stage image: {e}")))?;

        let mut command = self.command(settings, &input, &image_out, &palette_out);
        tracing::debug!(program = %self.program.display(), "Running external encoder");

        let output = command.output().map_err(|e| {
            ConvertError::EncodingFailure(format!(
                "failed to run {}: {e}",
                self.program.display()
            ))
        })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ConvertError::EncodingFailure(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                stderr.trim()
            )));
        }

        let read_output = |path: &Path| {
            std::fs::read(path).map_err(|e| {
                ConvertError::EncodingFailure(format!(
                    "encoder did not produce {}: {e}",
                    path.file_name().unwrap_or_default().to_string_lossy()
                ))
            })
        };
        let image_data = read_output(&image_out)?;
        let palette_data = read_output(&palette_out)?;

        let palette_entries = self.check_pair(image, settings, &image_data, &palette_data)?;
        Ok(EncodedPair {
            image_data,
            palette_data,
            palette_entries,
        })
    }
}

impl ExternalEncoder {
    /// Check a pair written by the program and return its entry count.
    ///
    /// The bitmap must match the image size, the palette must hold whole
    /// entries that fit the depth (and the quantize count unless padded),
    /// and every index must point at a palette entry.
    fn check_pair(
        &self,
        image: &CanonicalImage,
        settings: EncodeSettings,
        image_data: &[u8],
        palette_data: &[u8],
    ) -> Result<usize, ConvertError> {
        let width = image.width() as usize;
        let height = image.height() as usize;
        let depth = settings.bit_depth;

        let expected = depth.stride(width) * height;
        if image_data.len() != expected {
            return Err(ConvertError::EncodingFailure(format!(
                "encoder wrote {} bytes of image data, expected {expected}",
                image_data.len()
            )));
        }
        let entry_size = self.palette_format.entry_size();
        if palette_data.is_empty() || palette_data.len() % entry_size != 0 {
            return Err(ConvertError::EncodingFailure(format!(
                "encoder wrote {} bytes of palette data, not a whole number of {entry_size}-byte entries",
                palette_data.len()
            )));
        }

        let palette_entries = palette_data.len() / entry_size;
        if palette_entries > depth.capacity() {
            return Err(ConvertError::EncodingFailure(format!(
                "encoder wrote {palette_entries} palette entries, a {}-bit image holds at most {}",
                depth.bits(),
                depth.capacity()
            )));
        }
        let quantize = settings.quantize_count;
        if quantize > 0 && !self.pad_palette && palette_entries > quantize {
            return Err(ConvertError::EncodingFailure(format!(
                "encoder wrote {palette_entries} palette entries, more than the {quantize} requested"
            )));
        }

        let bitmap = PackedBitmap::from_bytes(
            image_data.to_vec(),
            width,
            height,
            depth,
            self.pixel_order,
        )
        .map_err(|e| ConvertError::EncodingFailure(e.to_string()))?;
        if let Some(&index) = bitmap
            .unpack()
            .iter()
            .find(|&&index| index as usize >= palette_entries)
        {
            return Err(ConvertError::EncodingFailure(format!(
                "encoder wrote index {index}, past the end of its {palette_entries}-entry palette"
            )));
        }

        Ok(palette_entries)
    }
}
