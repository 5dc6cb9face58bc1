//! Arrow conversions for the tabular types

use std::sync::Arc;

use arrow::array::{ArrayRef, Float32Array, Float64Array, UInt32Array, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;

use super::columns;
use crate::pomp_probe::{Polarization, PompProbeRecord};
use crate::series::{Spectrum, Transient};
use crate::streak::LongTable;

/// Conversion of an in-memory table into an Arrow [`RecordBatch`]
pub trait ToRecordBatch {
    /// Arrow schema of the batch
    fn schema(&self) -> SchemaRef;

    /// Build a batch holding every row of the table
    fn to_record_batch(&self) -> Result<RecordBatch, ArrowError>;
}

fn schema_of(fields: &[(&str, DataType)]) -> SchemaRef {
    let fields: Vec<Field> = fields
        .iter()
        .map(|(name, data_type)| Field::new(*name, data_type.clone(), false))
        .collect();
    Arc::new(Schema::new(fields))
}

fn f64_column(values: &[f64]) -> ArrayRef {
    Arc::new(Float64Array::from_iter_values(values.iter().copied()))
}

impl ToRecordBatch for LongTable {
    fn schema(&self) -> SchemaRef {
        schema_of(&[
            (columns::TIME, DataType::Float32),
            (columns::WAVELENGTH, DataType::Float32),
            (columns::INTENSITY, DataType::UInt32),
        ])
    }

    fn to_record_batch(&self) -> Result<RecordBatch, ArrowError> {
        let arrays: Vec<ArrayRef> = vec![
            Arc::new(Float32Array::from_iter_values(self.time.iter().copied())),
            Arc::new(Float32Array::from_iter_values(self.wavelength.iter().copied())),
            Arc::new(UInt32Array::from_iter_values(self.intensity.iter().copied())),
        ];
        RecordBatch::try_new(self.schema(), arrays)
    }
}

impl ToRecordBatch for Spectrum {
    fn schema(&self) -> SchemaRef {
        schema_of(&[
            (columns::WAVELENGTH, DataType::Float32),
            (columns::INTENSITY, DataType::UInt64),
        ])
    }

    fn to_record_batch(&self) -> Result<RecordBatch, ArrowError> {
        let arrays: Vec<ArrayRef> = vec![
            Arc::new(Float32Array::from_iter_values(self.wavelength.iter().copied())),
            Arc::new(UInt64Array::from_iter_values(self.intensity.iter().copied())),
        ];
        RecordBatch::try_new(self.schema(), arrays)
    }
}

impl ToRecordBatch for Transient {
    fn schema(&self) -> SchemaRef {
        schema_of(&[
            (columns::TIME, DataType::Float64),
            (columns::INTENSITY, DataType::Float64),
        ])
    }

    fn to_record_batch(&self) -> Result<RecordBatch, ArrowError> {
        RecordBatch::try_new(
            self.schema(),
            vec![f64_column(self.time()), f64_column(self.intensity())],
        )
    }
}

impl ToRecordBatch for PompProbeRecord {
    fn schema(&self) -> SchemaRef {
        self.transient().schema()
    }

    fn to_record_batch(&self) -> Result<RecordBatch, ArrowError> {
        self.transient().to_record_batch()
    }
}

impl ToRecordBatch for Polarization {
    fn schema(&self) -> SchemaRef {
        schema_of(&[
            (columns::TIME, DataType::Float64),
            (columns::RR, DataType::Float64),
            (columns::RL, DataType::Float64),
            (columns::SPIN_POLARIZATION, DataType::Float64),
        ])
    }

    fn to_record_batch(&self) -> Result<RecordBatch, ArrowError> {
        RecordBatch::try_new(
            self.schema(),
            vec![
                f64_column(&self.time),
                f64_column(&self.rr),
                f64_column(&self.rl),
                f64_column(&self.spin_polarization),
            ],
        )
    }
}
