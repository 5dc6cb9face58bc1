use crate::offset::OffsetError;
use crate::source::SourceError;

/// Errors that can occur while reading pump-probe data
#[derive(Debug, thiserror::Error)]
pub enum PompProbeError {
    /// The input could not be opened
    #[error("Source error: {0}")]
    SourceError(#[from] SourceError),

    /// I/O error reading the input
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// Text encoding label not recognized
    #[error("Unknown text encoding: {0}")]
    UnknownEncoding(String),

    /// Required column missing from the header row
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Offset correction failed
    #[error("Offset error: {0}")]
    OffsetError(#[from] OffsetError),
}

/// Errors that can occur while combining an RR/RL pair
#[derive(Debug, thiserror::Error)]
pub enum PairError {
    /// One of the two readings could not be decoded
    #[error("Failed to read {label} reading: {source}")]
    ReadingError {
        /// `RR` or `RL`
        label: &'static str,
        /// Underlying reader error
        #[source]
        source: PompProbeError,
    },

    /// Readings have different numbers of rows
    #[error("Row count mismatch: RR has {rr} rows, RL has {rl} rows")]
    LengthMismatch {
        /// Rows in the RR reading
        rr: usize,
        /// Rows in the RL reading
        rl: usize,
    },
}
