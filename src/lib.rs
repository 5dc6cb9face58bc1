//! # tlab - Time-Resolved Spectroscopy Data
//!
//! `tlab` decodes the raw output of two time-resolved optical measurements
//! and turns it into analysis-ready tables:
//!
//! - **Streak-camera photoluminescence**: fixed-layout binary images
//!   (480 time rows × 640 wavelength columns of photon counts) are decoded
//!   into a [`streak::StreakRecord`], projected into a long table and
//!   integrated into a time-integrated spectrum or a wavelength-integrated
//!   transient.
//!
//! - **Pump-probe readings**: delay-stage CSV exports are decoded into
//!   transients in picoseconds. Two readings with RR and RL circular
//!   polarization form a pair from which the spin polarization is derived.
//!
//! Transients are zeroed at their onset and baseline-corrected by a
//! rolling-statistics edge detector ([`offset`]). Every table can be written
//! to Parquet or CSV ([`export`]).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tlab::prelude::*;
//!
//! let record = StreakRecord::decode("sample.img")?;
//! let spectrum = record.to_hdf(None);
//! let transient = record.to_vdf(Some((485.0, 495.0)), &OffsetCorrection::default())?;
//!
//! let pair = PompProbePair::from_two_readings("RR.csv", "RL.csv", None)?;
//! write_table("polarization.parquet", pair.polarization(), &ExportConfig::default(), &[])?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Inputs
//!
//! Every decoder accepts a [`source::DataSource`]: a file path, an open
//! stream or an in-memory buffer. Directories and empty paths are rejected
//! before any read.

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod export;
pub mod offset;
pub mod pomp_probe;
pub mod series;
pub mod source;
pub mod streak;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::export::{
        write_csv, write_parquet, write_table, ExportConfig, ExportError, ExportFormat,
        ExportStats, ToRecordBatch,
    };
    pub use crate::offset::{AppliedOffset, OffsetCorrection, OffsetDetector, OffsetError};
    pub use crate::pomp_probe::{
        PairError, Polarization, PompProbeError, PompProbeOptions, PompProbePair,
        PompProbeRecord,
    };
    pub use crate::series::{SeriesError, Spectrum, Transient};
    pub use crate::source::{DataSource, SourceError};
    pub use crate::streak::{
        decode_batch, AcquisitionInfo, AxisRange, LongTable, StreakError, StreakRecord,
    };
}
