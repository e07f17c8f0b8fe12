//! Gamma lookup table access
//!
//! The table is generated at compile time by build.rs, one entry per
//! 8-bit channel value, so decoding is a single indexed load.

// Include the generated LUT from build.rs
include!(concat!(env!("OUT_DIR"), "/gamma_lut.rs"));

/// Convert an 8-bit sRGB channel value to linear light (0.0..=1.0).
#[inline]
pub fn srgb8_to_linear(value: u8) -> f32 {
    SRGB8_TO_LINEAR[value as usize]
}
