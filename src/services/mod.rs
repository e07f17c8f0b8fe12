pub mod encoder;
pub mod output;
pub mod pipeline;
pub mod preview;

pub use encoder::{AssetEncoder, EncodedPair, ExternalEncoder, InProcessEncoder};
pub use output::OutputPair;
pub use pipeline::{ConversionPipeline, ConversionReport};
pub use preview::{render_preview, PreviewRequest};
