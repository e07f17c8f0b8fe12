//! Palette types and utilities
//!
//! This module provides the ordered color table produced by quantization,
//! its on-disk serialization formats, and the error types for parsing and
//! validation.

mod error;
mod format;
mod palette;

pub use error::{PaletteError, ParseColorError};
pub use format::{PaletteFormat, PaletteLayout, DEFAULT_ALPHA_CUTOFF};
pub use palette::Palette;
