//! bgpack - background asset packer
//!
//! Converts PNG/JPEG images into packed palette-index bitmaps and palette
//! files for embedded displays. This library exposes modules for
//! integration testing.

pub mod error;
pub mod models;
pub mod services;
