/// Default number of k-means passes after the median cut.
pub const DEFAULT_REFINE_ITERATIONS: usize = 4;

/// Default palette size requested from the quantizer.
pub const DEFAULT_QUANTIZE_COUNT: usize = 16;

/// Options controlling palette reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantizeOptions {
    /// Upper bound on palette entries. Zero keeps every distinct color.
    pub quantize_count: usize,
    /// Maximum refinement passes. Zero keeps the raw median-cut clusters.
    pub refine_iterations: usize,
}

impl Default for QuantizeOptions {
    fn default() -> Self {
        Self {
            quantize_count: DEFAULT_QUANTIZE_COUNT,
            refine_iterations: DEFAULT_REFINE_ITERATIONS,
        }
    }
}

impl QuantizeOptions {
    /// Options with the given palette size and default refinement.
    pub fn with_count(quantize_count: usize) -> Self {
        Self {
            quantize_count,
            ..Self::default()
        }
    }
}
