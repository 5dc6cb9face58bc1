//! Integrated one-dimensional views.
//!
//! A streak image collapses into two kinds of series:
//!
//! - [`Spectrum`]: intensity summed over time, one row per wavelength (the
//!   "horizontal" view).
//! - [`Transient`]: intensity summed over wavelength, one row per time (the
//!   "vertical" view). Pump-probe readings are transients as well.

use crate::offset::OffsetError;

/// Errors raised when building a series from columns
#[derive(Debug, thiserror::Error)]
pub enum SeriesError {
    /// Column lengths differ
    #[error("Array length mismatch: time array has {time_len} elements, intensity array has {intensity_len} elements")]
    ArrayLengthMismatch {
        /// Length of the time column
        time_len: usize,
        /// Length of the intensity column
        intensity_len: usize,
    },
}

/// Time-integrated spectrum
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spectrum {
    /// Distinct wavelengths in nm, ascending
    pub wavelength: Vec<f32>,
    /// Summed counts per wavelength
    pub intensity: Vec<u64>,
}

impl Spectrum {
    /// Number of rows
    pub fn len(&self) -> usize {
        self.wavelength.len()
    }

    /// True when the spectrum has no rows
    pub fn is_empty(&self) -> bool {
        self.wavelength.is_empty()
    }
}

/// Time series of intensities
///
/// Both columns always have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transient {
    time: Vec<f64>,
    intensity: Vec<f64>,
}

impl Transient {
    /// Create a transient from equally long columns
    pub fn new(time: Vec<f64>, intensity: Vec<f64>) -> Result<Self, SeriesError> {
        if time.len() != intensity.len() {
            return Err(SeriesError::ArrayLengthMismatch {
                time_len: time.len(),
                intensity_len: intensity.len(),
            });
        }
        Ok(Self { time, intensity })
    }

    /// Columns zipped from the same rows
    pub(crate) fn from_rows(time: Vec<f64>, intensity: Vec<f64>) -> Self {
        debug_assert_eq!(time.len(), intensity.len());
        Self { time, intensity }
    }

    /// Time axis (ns for streak data, ps for pump-probe data)
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Intensity in arbitrary units
    pub fn intensity(&self) -> &[f64] {
        &self.intensity
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// True when the transient has no rows
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Shift the time axis so that `time[index]` becomes zero.
    ///
    /// Returns the subtracted offset.
    pub fn apply_time_offset(&mut self, index: usize) -> Result<f64, OffsetError> {
        let offset = *self.time.get(index).ok_or(OffsetError::OutOfRange {
            index,
            len: self.time.len(),
        })?;
        for t in &mut self.time {
            *t -= offset;
        }
        Ok(offset)
    }

    /// Subtract the mean of the samples strictly before `index` from every
    /// intensity.
    ///
    /// This is a degree-0 polynomial fit over the pre-onset samples. Returns
    /// the subtracted baseline.
    pub fn apply_intensity_offset(&mut self, index: usize) -> Result<f64, OffsetError> {
        if index > self.len() {
            return Err(OffsetError::OutOfRange {
                index,
                len: self.len(),
            });
        }
        if index == 0 {
            return Err(OffsetError::EmptyBaseline);
        }
        let baseline = self.intensity[..index].iter().sum::<f64>() / index as f64;
        for value in &mut self.intensity {
            *value -= baseline;
        }
        Ok(baseline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Transient {
        Transient::new(
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            vec![2.0, 4.0, 6.0, 50.0, 60.0],
        )
        .unwrap()
    }

    #[test]
    fn test_length_mismatch() {
        let result = Transient::new(vec![0.0, 1.0], vec![1.0]);
        assert!(matches!(
            result,
            Err(SeriesError::ArrayLengthMismatch {
                time_len: 2,
                intensity_len: 1
            })
        ));
    }

    #[test]
    fn test_columns_stay_equal_length_after_offsets() {
        let mut transient = ramp();
        transient.apply_time_offset(2).unwrap();
        transient.apply_intensity_offset(2).unwrap();
        assert_eq!(transient.time().len(), transient.len());
        assert_eq!(transient.intensity().len(), transient.len());
        assert_eq!(transient.intensity()[2], 3.0);
    }

    #[test]
    fn test_time_offset_zeroes_onset() {
        let mut transient = ramp();
        let offset = transient.apply_time_offset(3).unwrap();
        assert_eq!(offset, 4.0);
        assert_eq!(transient.time()[3], 0.0);
        assert_eq!(transient.time(), [-3.0, -2.0, -1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_intensity_offset_uses_pre_onset_mean() {
        let mut transient = ramp();
        let baseline = transient.apply_intensity_offset(3).unwrap();
        assert!((baseline - 4.0).abs() < 1e-12);

        let pre_onset_mean = transient.intensity()[..3].iter().sum::<f64>() / 3.0;
        assert!(pre_onset_mean.abs() < 1e-12);
        assert_eq!(transient.intensity()[4], 56.0);
    }

    #[test]
    fn test_offsets_reject_bad_index() {
        let mut transient = ramp();
        assert!(matches!(
            transient.apply_time_offset(5),
            Err(OffsetError::OutOfRange { index: 5, len: 5 })
        ));
        assert!(matches!(
            transient.apply_intensity_offset(0),
            Err(OffsetError::EmptyBaseline)
        ));
        assert!(matches!(
            transient.apply_intensity_offset(6),
            Err(OffsetError::OutOfRange { .. })
        ));
    }
}
