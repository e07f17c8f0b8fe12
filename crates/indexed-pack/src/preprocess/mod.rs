//! Source decoding and resampling.
//!
//! Turns an arbitrary PNG or JPEG into a [`CanonicalImage`]: 8-bit RGBA at
//! exactly the output dimensions. Resizing uses the Lanczos3 filter on all
//! four channels; see [`ResizeMode`] for how aspect ratio is handled.

mod error;
mod resize;
mod source;

pub use error::ResampleError;
pub use resize::{resample, ResizeMode};
pub use source::{CanonicalImage, SourceImage};
