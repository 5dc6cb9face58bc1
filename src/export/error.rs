/// Errors that can occur while exporting tables
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// I/O error creating or writing the output
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Record batch construction failed
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Parquet encoding failed
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    /// CSV encoding failed
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Acquisition info could not be serialized
    #[error("Metadata serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}
