//! Color types and conversion utilities
//!
//! Pixels travel through the pipeline as 8-bit [`Rgba`] values. Color
//! comparisons never happen on raw bytes: they go through [`LinearRgb`]
//! (gamma decoded) into [`Oklab`], where Euclidean distance tracks perceived
//! difference, and [`PerceptualColor`] adds alpha on top of that.
//!
//! # Example
//!
//! ```
//! use indexed_pack::{Oklab, PerceptualColor, Rgba};
//!
//! let orange = Rgba::opaque(255, 128, 0);
//! let lab = Oklab::from(orange);
//! assert!(lab.l > 0.5);
//!
//! let a = PerceptualColor::from(orange);
//! let b = PerceptualColor::from(Rgba::opaque(250, 130, 0));
//! assert!(a.distance_squared(b) < 0.001);
//! ```

mod linear_rgb;
mod lut;
mod oklab;
mod perceptual;
mod rgba;

pub use linear_rgb::LinearRgb;
pub use oklab::Oklab;
pub use perceptual::PerceptualColor;
pub use rgba::Rgba;
