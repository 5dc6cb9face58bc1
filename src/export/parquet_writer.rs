use std::io::Write;

use arrow::record_batch::RecordBatch;
use log::warn;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::{EnabledStatistics, WriterProperties};
use parquet::format::KeyValue;

use super::{ExportError, ExportFormat, ExportStats};

/// Configuration for Parquet output
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    /// ZSTD compression level
    pub compression_level: i32,

    /// Maximum rows per row group
    pub row_group_size: usize,

    /// Data page size in bytes
    pub data_page_size: usize,

    /// Whether to write column chunk statistics
    pub write_statistics: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            compression_level: 3,
            row_group_size: 100_000,
            data_page_size: 1024 * 1024,
            write_statistics: true,
        }
    }
}

impl ExportConfig {
    /// Writer properties carrying the given key-value metadata
    pub fn to_writer_properties(&self, metadata: &[(String, String)]) -> WriterProperties {
        let level = ZstdLevel::try_new(self.compression_level).unwrap_or_else(|_| {
            warn!(
                "ZSTD compression level {} is out of range; using the default level",
                self.compression_level
            );
            ZstdLevel::default()
        });
        let compression = Compression::ZSTD(level);

        let statistics = if self.write_statistics {
            EnabledStatistics::Chunk
        } else {
            EnabledStatistics::None
        };

        let kv_metadata: Vec<KeyValue> = metadata
            .iter()
            .map(|(key, value)| KeyValue {
                key: key.clone(),
                value: Some(value.clone()),
            })
            .collect();

        WriterProperties::builder()
            .set_compression(compression)
            .set_data_page_size_limit(self.data_page_size)
            .set_statistics_enabled(statistics)
            .set_max_row_group_size(self.row_group_size.max(1))
            .set_key_value_metadata((!kv_metadata.is_empty()).then_some(kv_metadata))
            .build()
    }
}

/// Write a batch as a single Parquet file
pub fn write_parquet<W: Write + Send>(
    writer: W,
    batch: &RecordBatch,
    config: &ExportConfig,
    metadata: &[(String, String)],
) -> Result<ExportStats, ExportError> {
    let props = config.to_writer_properties(metadata);
    let mut arrow_writer = ArrowWriter::try_new(writer, batch.schema(), Some(props))?;
    arrow_writer.write(batch)?;
    let file_metadata = arrow_writer.close()?;

    Ok(ExportStats {
        format: ExportFormat::Parquet,
        rows_written: batch.num_rows(),
        row_groups_written: file_metadata.row_groups.len(),
    })
}
