//! Long-form projection of a streak image.
//!
//! Every intensity sample becomes one row with its time and wavelength
//! broadcast alongside. Rows are ordered by time (outer) then wavelength
//! (inner), which is the storage order of the intensity grid.

use super::StreakRecord;

/// One row of a [`LongTable`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row {
    /// Time in ns
    pub time: f32,
    /// Wavelength in nm
    pub wavelength: f32,
    /// Photon counts
    pub intensity: u32,
}

/// Long table with `time`, `wavelength` and `intensity` columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LongTable {
    /// Time column
    pub time: Vec<f32>,
    /// Wavelength column
    pub wavelength: Vec<f32>,
    /// Intensity column
    pub intensity: Vec<u32>,
}

impl LongTable {
    /// Project a record into long form
    pub fn project(record: &StreakRecord) -> Self {
        let wavelength_count = record.wavelength().len();
        let time_count = record.time().len();

        let mut time = Vec::with_capacity(time_count * wavelength_count);
        for &t in record.time() {
            time.extend(std::iter::repeat(t).take(wavelength_count));
        }

        let mut wavelength = Vec::with_capacity(time_count * wavelength_count);
        for _ in 0..time_count {
            wavelength.extend_from_slice(record.wavelength());
        }

        Self {
            time,
            wavelength,
            intensity: record.intensity().to_vec(),
        }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.intensity.len()
    }

    /// True when the table has no rows
    pub fn is_empty(&self) -> bool {
        self.intensity.is_empty()
    }

    /// Row at `index`
    pub fn row(&self, index: usize) -> Option<Row> {
        Some(Row {
            time: *self.time.get(index)?,
            wavelength: *self.wavelength.get(index)?,
            intensity: *self.intensity.get(index)?,
        })
    }

    /// Iterate over rows in storage order
    pub fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        self.time
            .iter()
            .zip(&self.wavelength)
            .zip(&self.intensity)
            .map(|((&time, &wavelength), &intensity)| Row {
                time,
                wavelength,
                intensity,
            })
    }
}
