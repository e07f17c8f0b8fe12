//! High-level encoding API.

mod builder;
mod error;

pub use builder::{EncodedAssets, IndexedEncoder};
pub use error::EncodeError;
