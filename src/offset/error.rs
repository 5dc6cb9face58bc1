/// Errors that can occur during offset detection and correction
#[derive(Debug, thiserror::Error)]
pub enum OffsetError {
    /// No sample rose above the rolling threshold
    #[error("No signal onset found: no sample exceeded the rolling mean by {k} standard deviations")]
    NotFound {
        /// Threshold multiplier used for detection
        k: f64,
    },

    /// The baseline fit has no samples before the onset
    #[error("Empty baseline: onset index 0 leaves no samples to fit")]
    EmptyBaseline,

    /// Index outside of the series
    #[error("Offset index {index} out of range for series of length {len}")]
    OutOfRange {
        /// Requested index
        index: usize,
        /// Series length
        len: usize,
    },

    /// Rolling window too small for a sample standard deviation
    #[error("Invalid rolling window: {0} (must be at least 2)")]
    InvalidWindow(usize),
}
