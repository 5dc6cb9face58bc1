use crate::offset::OffsetError;
use crate::source::SourceError;

/// Errors that can occur while reading or processing streak records
#[derive(Debug, thiserror::Error)]
pub enum StreakError {
    /// The input could not be opened
    #[error("Source error: {0}")]
    SourceError(#[from] SourceError),

    /// I/O error while reading or writing the binary layout
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Intensity grid does not match the axes
    #[error("Shape mismatch: {intensity} intensity values for {time} time x {wavelength} wavelength samples")]
    ShapeMismatch {
        /// Length of the time axis
        time: usize,
        /// Length of the wavelength axis
        wavelength: usize,
        /// Number of intensity values
        intensity: usize,
    },

    /// Header is not exactly 64 bytes
    #[error("Invalid header: expected {expected} bytes, got {actual}")]
    InvalidHeader {
        /// Required header length
        expected: usize,
        /// Supplied header length
        actual: usize,
    },

    /// Metadata lines would not survive the binary layout
    #[error("Invalid metadata: {0}")]
    InvalidMetadata(String),

    /// Offset correction of the vertical view failed
    #[error("Offset error: {0}")]
    OffsetError(#[from] OffsetError),
}
