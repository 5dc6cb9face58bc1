use std::sync::OnceLock;

use super::{PairError, PompProbeOptions, PompProbeRecord};
use crate::source::DataSource;

/// Spin polarization table derived from an RR/RL pair
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polarization {
    /// Delay time in ps, taken from the RR reading
    pub time: Vec<f64>,
    /// RR intensity
    pub rr: Vec<f64>,
    /// RL intensity
    pub rl: Vec<f64>,
    /// `(RR - RL) / (RR + RL) * 100`, in percent
    pub spin_polarization: Vec<f64>,
}

impl Polarization {
    /// Join two readings row by row.
    ///
    /// A zero denominator gives a non-finite value for that row.
    pub fn from_readings(rr: &PompProbeRecord, rl: &PompProbeRecord) -> Self {
        let spin_polarization = rr
            .intensity()
            .iter()
            .zip(rl.intensity())
            .map(|(&rr, &rl)| (rr - rl) / (rr + rl) * 100.0)
            .collect();

        Self {
            time: rr.time().to_vec(),
            rr: rr.intensity().to_vec(),
            rl: rl.intensity().to_vec(),
            spin_polarization,
        }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// True when the table has no rows
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// Readings taken with RR and RL circular polarization
///
/// Both readings must have the same number of rows; they are joined by row
/// position, not by time value, since each reading is zeroed at its own onset.
#[derive(Debug, Clone)]
pub struct PompProbePair {
    rr: PompProbeRecord,
    rl: PompProbeRecord,
    polarization: OnceLock<Polarization>,
}

impl PompProbePair {
    /// Pair two decoded readings
    pub fn new(rr: PompProbeRecord, rl: PompProbeRecord) -> Result<Self, PairError> {
        if rr.len() != rl.len() {
            return Err(PairError::LengthMismatch {
                rr: rr.len(),
                rl: rl.len(),
            });
        }
        Ok(Self {
            rr,
            rl,
            polarization: OnceLock::new(),
        })
    }

    /// Decode both readings with default options and the given encoding
    pub fn from_two_readings<R, L>(
        rr_source: R,
        rl_source: L,
        encoding: Option<&str>,
    ) -> Result<Self, PairError>
    where
        R: Into<DataSource>,
        L: Into<DataSource>,
    {
        let options = PompProbeOptions {
            encoding: encoding.map(str::to_string),
            ..Default::default()
        };
        Self::from_readings_with(rr_source, rl_source, &options)
    }

    /// Decode both readings with the same options
    pub fn from_readings_with<R, L>(
        rr_source: R,
        rl_source: L,
        options: &PompProbeOptions,
    ) -> Result<Self, PairError>
    where
        R: Into<DataSource>,
        L: Into<DataSource>,
    {
        let rr = PompProbeRecord::from_source(rr_source, options)
            .map_err(|source| PairError::ReadingError { label: "RR", source })?;
        let rl = PompProbeRecord::from_source(rl_source, options)
            .map_err(|source| PairError::ReadingError { label: "RL", source })?;
        Self::new(rr, rl)
    }

    /// RR reading
    pub fn rr(&self) -> &PompProbeRecord {
        &self.rr
    }

    /// RL reading
    pub fn rl(&self) -> &PompProbeRecord {
        &self.rl
    }

    /// Spin polarization table, computed once
    pub fn polarization(&self) -> &Polarization {
        self.polarization
            .get_or_init(|| Polarization::from_readings(&self.rr, &self.rl))
    }
}
