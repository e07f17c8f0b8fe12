use std::fmt;
use std::path::{Path, PathBuf};

use indexed_pack::{
    PaletteFormat, PixelOrder, ResizeMode, Rgba, DEFAULT_ALPHA_CUTOFF, DEFAULT_REFINE_ITERATIONS,
};
use serde::Deserialize;

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "BGPACK_CONFIG";

/// Error from loading or interpreting a config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Conversion defaults loaded from config.yaml.
///
/// Every key is optional. Enum-like values are kept as strings here and
/// parsed by [`ConversionConfig::options`] so a bad value names its key.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ConversionConfig {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub quantize: usize,
    pub resize_mode: String,
    pub pad_color: String,
    pub refine_iterations: usize,
    pub pixel_order: String,
    pub palette_format: String,
    pub alpha_cutoff: u8,
    pub pad_palette: bool,
    pub encoder: EncoderConfig,
}

/// Optional external encoder command.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct EncoderConfig {
    /// Program to run instead of the built-in encoder.
    pub command: Option<PathBuf>,
    /// Arguments placed before the standard `-b`/`-q` arguments.
    pub args: Vec<String>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            bit_depth: 4,
            quantize: 16,
            resize_mode: ResizeMode::default().to_string(),
            pad_color: "#00000000".to_string(),
            refine_iterations: DEFAULT_REFINE_ITERATIONS,
            pixel_order: PixelOrder::default().to_string(),
            palette_format: PaletteFormat::default().to_string(),
            alpha_cutoff: DEFAULT_ALPHA_CUTOFF,
            pad_palette: false,
            encoder: EncoderConfig::default(),
        }
    }
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Defaults,
    File(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Defaults => write!(f, "built-in defaults"),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl ConversionConfig {
    /// Parse a YAML document.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        // An empty document is all defaults.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load from an explicit path, else from `BGPACK_CONFIG`, else defaults.
    ///
    /// A named file that cannot be read or parsed is an error, never a
    /// silent fallback.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigSource), ConfigError> {
        let env_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        match resolve_config_path(explicit, env_path) {
            Some(path) => Ok((Self::from_file(&path)?, ConfigSource::File(path))),
            None => Ok((Self::default(), ConfigSource::Defaults)),
        }
    }

    /// Parse the string-valued keys into typed conversion options.
    pub fn options(&self) -> Result<ConversionOptions, ConfigError> {
        let invalid = |key: &'static str| move |reason: String| ConfigError::InvalidValue { key, reason };

        Ok(ConversionOptions {
            resize_mode: self.resize_mode.parse().map_err(invalid("resize_mode"))?,
            pad_color: self
                .pad_color
                .parse::<Rgba>()
                .map_err(|e| e.to_string())
                .map_err(invalid("pad_color"))?,
            refine_iterations: self.refine_iterations,
            pixel_order: self.pixel_order.parse().map_err(invalid("pixel_order"))?,
            palette_format: self.palette_format.parse().map_err(invalid("palette_format"))?,
            alpha_cutoff: self.alpha_cutoff,
            pad_palette: self.pad_palette,
        })
    }
}

/// Pick the config file: an explicit path wins over the environment.
pub fn resolve_config_path(explicit: Option<&Path>, env_path: Option<PathBuf>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| env_path.filter(|p| !p.as_os_str().is_empty()))
}

/// Typed conversion options beyond the four core parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionOptions {
    pub resize_mode: ResizeMode,
    pub pad_color: Rgba,
    pub refine_iterations: usize,
    pub pixel_order: PixelOrder,
    pub palette_format: PaletteFormat,
    pub alpha_cutoff: u8,
    pub pad_palette: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            resize_mode: ResizeMode::default(),
            pad_color: Rgba::TRANSPARENT,
            refine_iterations: DEFAULT_REFINE_ITERATIONS,
            pixel_order: PixelOrder::default(),
            palette_format: PaletteFormat::default(),
            alpha_cutoff: DEFAULT_ALPHA_CUTOFF,
            pad_palette: false,
        }
    }
}
