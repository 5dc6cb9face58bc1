//! # Pump-Probe Readings
//!
//! A pump-probe reading is a transient recorded by sweeping a delay stage:
//! the stage position (cm) is converted to a delay time (ps) and the lock-in
//! voltage (mV) to an intensity. Readings are offset-corrected on
//! construction unless disabled.
//!
//! Two readings taken with co- and counter-rotating circular polarization
//! (RR and RL) form a [`PompProbePair`], from which the spin polarization
//! is derived.
//!
//! ```rust,no_run
//! use tlab::pomp_probe::{PompProbeOptions, PompProbePair, PompProbeRecord};
//!
//! let reading = PompProbeRecord::decode("RR.csv")?;
//! let raw = PompProbeRecord::from_source(
//!     "RR.csv",
//!     &PompProbeOptions::default().with_time_offset(false).with_intensity_offset(false),
//! )?;
//!
//! let pair = PompProbePair::from_two_readings("RR.csv", "RL.csv", None)?;
//! for (t, p) in pair.polarization().time.iter().zip(&pair.polarization().spin_polarization) {
//!     println!("{t:.3} ps  {p:.2} %");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod pair;
pub mod reader;


pub use error::{PairError, PompProbeError};
pub use pair::{Polarization, PompProbePair};
pub use reader::{PompProbeFormat, PompProbeOptions};

use crate::offset::AppliedOffset;
use crate::series::Transient;
use crate::source::DataSource;

/// A single pump-probe reading
#[derive(Debug, Clone, PartialEq)]
pub struct PompProbeRecord {
    transient: Transient,
    offset: Option<AppliedOffset>,
}

impl PompProbeRecord {
    /// Decode a reading with default options (cp932, both offsets on)
    pub fn decode<S: Into<DataSource>>(source: S) -> Result<Self, PompProbeError> {
        Self::from_source(source, &PompProbeOptions::default())
    }

    /// Decode a reading from a file path, an open stream or bytes
    pub fn from_source<S: Into<DataSource>>(
        source: S,
        options: &PompProbeOptions,
    ) -> Result<Self, PompProbeError> {
        let bytes = source.into().read_all()?;
        let mut transient = reader::parse(&bytes, options)?;
        let offset = options.correction.apply(&mut transient)?;
        Ok(Self { transient, offset })
    }

    /// Wrap an already computed transient without correction
    pub fn from_transient(transient: Transient) -> Self {
        Self {
            transient,
            offset: None,
        }
    }

    /// Delay time in ps
    pub fn time(&self) -> &[f64] {
        self.transient.time()
    }

    /// Intensity in arbitrary units
    pub fn intensity(&self) -> &[f64] {
        self.transient.intensity()
    }

    /// The underlying time series
    pub fn transient(&self) -> &Transient {
        &self.transient
    }

    /// Offsets applied at construction, if any
    pub fn applied_offset(&self) -> Option<&AppliedOffset> {
        self.offset.as_ref()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.transient.len()
    }

    /// True when the reading has no rows
    pub fn is_empty(&self) -> bool {
        self.transient.is_empty()
    }
}
