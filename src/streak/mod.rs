//! # Streak-Camera Photoluminescence Records
//!
//! A streak image is a grid of photon counts indexed by time after
//! excitation (rows) and emission wavelength (columns). This module decodes
//! the camera's binary files into a [`StreakRecord`], projects records into
//! long form and computes the integrated views.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tlab::offset::OffsetCorrection;
//! use tlab::streak::StreakRecord;
//!
//! let record = StreakRecord::decode("sample.img")?;
//!
//! // Time-integrated spectrum over the first nanosecond
//! let spectrum = record.to_hdf(Some((0.0, 1.0)));
//!
//! // Wavelength-integrated transient around 490 nm, zeroed at the onset
//! let transient = record.to_vdf(Some((485.0, 495.0)), &OffsetCorrection::default())?;
//! # Ok::<(), tlab::streak::StreakError>(())
//! ```

pub mod aggregate;
pub mod codec;
mod error;
pub mod metadata;
mod table;


use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;

use log::info;

pub use aggregate::{horizontal, vertical, AxisRange};
pub use codec::{
    DEFAULT_HEADER, HEADER_LEN, METADATA_LINES, TIME_RESOLUTION, WAVELENGTH_RESOLUTION,
};
pub use error::StreakError;
pub use metadata::AcquisitionInfo;
pub use table::{LongTable, Row};

use crate::offset::OffsetCorrection;
use crate::series::{Spectrum, Transient};
use crate::source::DataSource;

/// Decoded streak image
///
/// Immutable after construction. The long-form table is computed on first
/// access and cached for the lifetime of the record.
#[derive(Debug, Clone)]
pub struct StreakRecord {
    header: Vec<u8>,
    metadata: Vec<String>,
    time: Vec<f32>,
    wavelength: Vec<f32>,
    intensity: Vec<u32>,
    long_table: OnceLock<LongTable>,
}

impl StreakRecord {
    /// Create a record from arrays with the default header and blank metadata
    pub fn new(
        time: Vec<f32>,
        wavelength: Vec<f32>,
        intensity: Vec<u32>,
    ) -> Result<Self, StreakError> {
        Self::from_parts(DEFAULT_HEADER.to_vec(), Vec::new(), time, wavelength, intensity)
    }

    /// Create a record from all of its parts.
    ///
    /// The header must be exactly [`HEADER_LEN`] bytes and the intensity grid
    /// must hold one value per (time, wavelength) pair. At most
    /// [`METADATA_LINES`] metadata lines are accepted, each terminated by a
    /// single `\n`; missing lines are filled with blank `"\n"` lines, which
    /// is how they are read back from a file.
    pub fn from_parts(
        header: Vec<u8>,
        metadata: Vec<String>,
        time: Vec<f32>,
        wavelength: Vec<f32>,
        intensity: Vec<u32>,
    ) -> Result<Self, StreakError> {
        if header.len() != HEADER_LEN {
            return Err(StreakError::InvalidHeader {
                expected: HEADER_LEN,
                actual: header.len(),
            });
        }
        let metadata = normalize_metadata(metadata)?;
        Self::from_decoded(header, metadata, time, wavelength, intensity)
    }

    /// Header length and metadata lines are not checked for decoded data
    pub(crate) fn from_decoded(
        header: Vec<u8>,
        metadata: Vec<String>,
        time: Vec<f32>,
        wavelength: Vec<f32>,
        intensity: Vec<u32>,
    ) -> Result<Self, StreakError> {
        if intensity.len() != time.len() * wavelength.len() {
            return Err(StreakError::ShapeMismatch {
                time: time.len(),
                wavelength: wavelength.len(),
                intensity: intensity.len(),
            });
        }
        Ok(Self {
            header,
            metadata,
            time,
            wavelength,
            intensity,
            long_table: OnceLock::new(),
        })
    }

    /// Decode a record from a file path, an open stream or bytes
    pub fn decode<S: Into<DataSource>>(source: S) -> Result<Self, StreakError> {
        let mut reader = source.into().open()?;
        codec::decode(&mut reader)
    }

    /// Encode the record into the binary layout
    pub fn encode(&self) -> Vec<u8> {
        codec::encode(self)
    }

    /// Stream the binary layout to a writer
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), StreakError> {
        codec::write(self, writer)?;
        Ok(())
    }

    /// Opaque device header
    pub fn header(&self) -> &[u8] {
        &self.header
    }

    /// Metadata lines as read, trailing newlines included
    pub fn metadata(&self) -> &[String] {
        &self.metadata
    }

    /// Time axis in ns
    pub fn time(&self) -> &[f32] {
        &self.time
    }

    /// Wavelength axis in nm
    pub fn wavelength(&self) -> &[f32] {
        &self.wavelength
    }

    /// Row-major intensity grid
    pub fn intensity(&self) -> &[u32] {
        &self.intensity
    }

    /// Intensity grid as one slice per time row
    pub fn streak_image(&self) -> Vec<&[u32]> {
        if self.wavelength.is_empty() {
            return Vec::new();
        }
        self.intensity.chunks_exact(self.wavelength.len()).collect()
    }

    /// Parsed acquisition settings from the metadata lines
    pub fn acquisition_info(&self) -> AcquisitionInfo {
        AcquisitionInfo::parse(&self.metadata)
    }

    /// Long-form table, computed once
    pub fn long_table(&self) -> &LongTable {
        self.long_table.get_or_init(|| LongTable::project(self))
    }

    /// Time-integrated spectrum (horizontal view)
    pub fn to_hdf(&self, time_range: Option<AxisRange>) -> Spectrum {
        horizontal(self.long_table(), time_range)
    }

    /// Wavelength-integrated transient (vertical view) with offset correction
    pub fn to_vdf(
        &self,
        wavelength_range: Option<AxisRange>,
        correction: &OffsetCorrection,
    ) -> Result<Transient, StreakError> {
        Ok(vertical(self.long_table(), wavelength_range, correction)?)
    }
}

/// Check metadata lines and pad them to [`METADATA_LINES`]
fn normalize_metadata(mut metadata: Vec<String>) -> Result<Vec<String>, StreakError> {
    if metadata.len() > METADATA_LINES {
        return Err(StreakError::InvalidMetadata(format!(
            "expected at most {} lines, got {}",
            METADATA_LINES,
            metadata.len()
        )));
    }
    for (index, line) in metadata.iter().enumerate() {
        if !line.ends_with('\n') || line.matches('\n').count() != 1 {
            return Err(StreakError::InvalidMetadata(format!(
                "line {} must end with exactly one newline: {:?}",
                index, line
            )));
        }
    }
    metadata.resize(METADATA_LINES, "\n".to_string());
    Ok(metadata)
}

impl PartialEq for StreakRecord {
    fn eq(&self, other: &Self) -> bool {
        self.header == other.header
            && self.metadata == other.metadata
            && self.time == other.time
            && self.wavelength == other.wavelength
            && self.intensity == other.intensity
    }
}

/// Decode many files; results keep the input order.
///
/// Files are decoded in parallel when the `parallel` feature is enabled.
pub fn decode_batch(paths: &[PathBuf]) -> Vec<Result<StreakRecord, StreakError>> {
    info!("Decoding {} streak files", paths.len());

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        paths.par_iter().map(StreakRecord::decode).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        paths.iter().map(StreakRecord::decode).collect()
    }
}
