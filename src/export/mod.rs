//! # Table Export
//!
//! Every tabular view in this crate converts into an Arrow [`RecordBatch`]
//! through [`ToRecordBatch`], and a batch can be written as ZSTD-compressed
//! Parquet or as plain CSV.
//!
//! ```rust,no_run
//! use tlab::export::{self, ExportConfig};
//! use tlab::streak::StreakRecord;
//!
//! let record = StreakRecord::decode("sample.img")?;
//! let metadata = export::streak_metadata(&record)?;
//! let stats = export::write_table(
//!     "sample.parquet",
//!     record.long_table(),
//!     &ExportConfig::default(),
//!     &metadata,
//! )?;
//! println!("{stats}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod batch;
mod csv_writer;
mod error;
mod parquet_writer;


use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use log::info;

pub use arrow::record_batch::RecordBatch;
pub use batch::ToRecordBatch;
pub use csv_writer::write_csv;
pub use error::ExportError;
pub use parquet_writer::{write_parquet, ExportConfig};

use crate::streak::StreakRecord;

/// Column names of the exported tables
pub mod columns {
    /// Time axis (ns for streak data, ps for pump-probe data)
    pub const TIME: &str = "time";
    /// Wavelength axis in nm
    pub const WAVELENGTH: &str = "wavelength";
    /// Intensity
    pub const INTENSITY: &str = "intensity";
    /// RR reading intensity
    pub const RR: &str = "RR";
    /// RL reading intensity
    pub const RL: &str = "RL";
    /// Spin polarization in percent
    pub const SPIN_POLARIZATION: &str = "SpinPolarization";
}

/// Key-value metadata keys attached to Parquet exports
pub mod metadata_keys {
    /// Raw 64-byte streak header as lowercase hex
    pub const HEADER: &str = "tlab:header";
    /// Streak metadata lines, concatenated as read
    pub const METADATA: &str = "tlab:metadata";
    /// Parsed acquisition info as JSON
    pub const ACQUISITION: &str = "tlab:acquisition";
}

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Apache Parquet
    Parquet,
    /// Comma-separated values
    Csv,
}

impl ExportFormat {
    /// `.parquet` files are Parquet, anything else is CSV
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("parquet") => Self::Parquet,
            _ => Self::Csv,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parquet => write!(f, "Parquet"),
            Self::Csv => write!(f, "CSV"),
        }
    }
}

/// Statistics from a completed export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportStats {
    /// Format that was written
    pub format: ExportFormat,
    /// Number of data rows
    pub rows_written: usize,
    /// Parquet row groups (0 for CSV)
    pub row_groups_written: usize,
}

impl fmt::Display for ExportStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format {
            ExportFormat::Parquet => write!(
                f,
                "Wrote {} rows in {} row groups (Parquet)",
                self.rows_written, self.row_groups_written
            ),
            ExportFormat::Csv => write!(f, "Wrote {} rows (CSV)", self.rows_written),
        }
    }
}

/// Write a table to `path`, choosing the format from the extension.
///
/// `metadata` is stored as Parquet key-value metadata and ignored for CSV.
pub fn write_table<P, T>(
    path: P,
    table: &T,
    config: &ExportConfig,
    metadata: &[(String, String)],
) -> Result<ExportStats, ExportError>
where
    P: AsRef<Path>,
    T: ToRecordBatch + ?Sized,
{
    let path = path.as_ref();
    let batch = table.to_record_batch()?;
    let file = File::create(path)?;

    let stats = match ExportFormat::from_path(path) {
        ExportFormat::Parquet => write_parquet(file, &batch, config, metadata)?,
        ExportFormat::Csv => write_csv(BufWriter::new(file), &batch)?,
    };

    info!("{} to {}", stats, path.display());
    Ok(stats)
}

/// Key-value metadata describing the record a streak table came from
pub fn streak_metadata(record: &StreakRecord) -> Result<Vec<(String, String)>, ExportError> {
    let header: String = record
        .header()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect();
    let acquisition = serde_json::to_string(&record.acquisition_info())?;

    Ok(vec![
        (metadata_keys::HEADER.to_string(), header),
        (metadata_keys::METADATA.to_string(), record.metadata().concat()),
        (metadata_keys::ACQUISITION.to_string(), acquisition),
    ])
}
