pub mod config;
pub mod params;

pub use config::{
    ConfigError, ConfigSource, ConversionConfig, ConversionOptions, EncoderConfig, CONFIG_ENV,
};
pub use params::{
    ConversionParams, ConversionRequest, EncodeParams, EncodeRequest, EncodeSettings,
};
