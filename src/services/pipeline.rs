use std::path::Path;

use indexed_pack::{resample, BitDepth, CanonicalImage, SourceImage};

use crate::error::ConvertError;
use crate::models::{
    ConfigError, ConversionConfig, ConversionOptions, ConversionParams, EncodeParams,
    EncodeSettings,
};
use crate::services::{AssetEncoder, ExternalEncoder, InProcessEncoder, OutputPair};

/// Summary of a finished conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub width: u32,
    pub height: u32,
    pub bit_depth: BitDepth,
    /// Palette entries written, padding included.
    pub palette_entries: usize,
    pub image_bytes: usize,
    pub palette_bytes: usize,
    pub outputs: OutputPair,
}

/// Conversion pipeline that orchestrates decode → resample → encode → commit
pub struct ConversionPipeline {
    options: ConversionOptions,
    encoder: Box<dyn AssetEncoder>,
}

impl ConversionPipeline {
    pub fn new(options: ConversionOptions, encoder: Box<dyn AssetEncoder>) -> Self {
        Self { options, encoder }
    }

    /// Pipeline using the built-in encoder.
    pub fn in_process(options: ConversionOptions) -> Self {
        Self::new(options, Box::new(InProcessEncoder::new(options)))
    }

    /// Pipeline configured from a config file, external encoder included.
    pub fn from_config(config: &ConversionConfig) -> Result<Self, ConfigError> {
        let options = config.options()?;
        let encoder: Box<dyn AssetEncoder> = match &config.encoder.command {
            Some(program) => Box::new(
                ExternalEncoder::new(program, config.encoder.args.clone())
                    .palette_format(options.palette_format)
                    .pixel_order(options.pixel_order)
                    .pad_palette(options.pad_palette),
            ),
            None => Box::new(InProcessEncoder::new(options)),
        };
        Ok(Self::new(options, encoder))
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    pub fn encoder_name(&self) -> &str {
        self.encoder.name()
    }

    /// Convert one source image into an output pair.
    ///
    /// Parameters are validated before any file is read or created, and
    /// nothing is written unless every stage succeeds.
    pub fn run(&self, params: &ConversionParams) -> Result<ConversionReport, ConvertError> {
        let request = params.validate()?;

        let source = decode(request.source())?;
        tracing::debug!(
            source = %request.source().display(),
            width = source.width(),
            height = source.height(),
            "Decoded source image"
        );

        let canonical = resample(
            &source,
            request.width(),
            request.height(),
            self.options.resize_mode,
            self.options.pad_color,
        )
        .map_err(|e| ConvertError::from_resample(e, request.source()))?;
        drop(source);
        tracing::debug!(
            width = canonical.width(),
            height = canonical.height(),
            mode = %self.options.resize_mode,
            "Resampled"
        );

        self.encode_and_commit(
            &canonical,
            request.settings(),
            OutputPair::new(request.image_out(), request.palette_out()),
        )
    }

    /// Encode a source at its own size, without resampling.
    pub fn encode_canonical_file(
        &self,
        params: &EncodeParams,
    ) -> Result<ConversionReport, ConvertError> {
        let request = params.validate()?;
        let source = decode(request.source())?;
        let canonical = CanonicalImage::from_source(&source);

        self.encode_and_commit(
            &canonical,
            request.settings(),
            OutputPair::new(request.image_out(), request.palette_out()),
        )
    }

    fn encode_and_commit(
        &self,
        canonical: &CanonicalImage,
        settings: EncodeSettings,
        outputs: OutputPair,
    ) -> Result<ConversionReport, ConvertError> {
        let pair = self.encoder.encode(canonical, settings)?;
        outputs.commit(&pair.image_data, &pair.palette_data)?;

        let report = ConversionReport {
            width: canonical.width(),
            height: canonical.height(),
            bit_depth: settings.bit_depth,
            palette_entries: pair.palette_entries,
            image_bytes: pair.image_data.len(),
            palette_bytes: pair.palette_data.len(),
            outputs,
        };

        tracing::info!(
            encoder = self.encoder.name(),
            width = report.width,
            height = report.height,
            bits = report.bit_depth.bits(),
            palette_entries = report.palette_entries,
            image_bytes = report.image_bytes,
            palette_bytes = report.palette_bytes,
            "Conversion complete"
        );
        Ok(report)
    }
}

fn decode(path: &Path) -> Result<SourceImage, ConvertError> {
    SourceImage::open(path).map_err(|e| ConvertError::from_resample(e, path))
}
