use std::io::Write;

use arrow::record_batch::RecordBatch;
use arrow::util::display::{ArrayFormatter, FormatOptions};

use super::{ExportError, ExportFormat, ExportStats};

/// Write a batch as comma-separated text with a header row
pub fn write_csv<W: Write>(writer: W, batch: &RecordBatch) -> Result<ExportStats, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let schema = batch.schema();
    csv_writer.write_record(schema.fields().iter().map(|field| field.name()))?;

    let options = FormatOptions::default();
    let formatters = batch
        .columns()
        .iter()
        .map(|column| ArrayFormatter::try_new(column.as_ref(), &options))
        .collect::<Result<Vec<_>, _>>()?;

    let mut record = Vec::with_capacity(formatters.len());
    for row in 0..batch.num_rows() {
        record.clear();
        record.extend(formatters.iter().map(|f| f.value(row).to_string()));
        csv_writer.write_record(&record)?;
    }
    csv_writer.flush()?;

    Ok(ExportStats {
        format: ExportFormat::Csv,
        rows_written: batch.num_rows(),
        row_groups_written: 0,
    })
}
