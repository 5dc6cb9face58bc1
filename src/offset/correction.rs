use log::debug;

use super::{OffsetDetector, OffsetError};
use crate::series::Transient;

/// Which offset corrections to apply to a transient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetCorrection {
    /// Zero the time axis at the detected onset
    pub auto_time_offset: bool,
    /// Subtract the pre-onset baseline from the intensity
    pub auto_intensity_offset: bool,
    /// Onset detector
    pub detector: OffsetDetector,
}

impl Default for OffsetCorrection {
    fn default() -> Self {
        Self {
            auto_time_offset: true,
            auto_intensity_offset: true,
            detector: OffsetDetector::default(),
        }
    }
}

/// Offsets applied by [`OffsetCorrection::apply`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedOffset {
    /// Detected onset index
    pub index: usize,
    /// Time subtracted from the time axis, if applied
    pub time_offset: Option<f64>,
    /// Baseline subtracted from the intensity, if applied
    pub intensity_offset: Option<f64>,
}

impl OffsetCorrection {
    /// No correction at all
    pub fn disabled() -> Self {
        Self {
            auto_time_offset: false,
            auto_intensity_offset: false,
            ..Default::default()
        }
    }

    /// Enable or disable time zeroing
    pub fn with_time_offset(mut self, enabled: bool) -> Self {
        self.auto_time_offset = enabled;
        self
    }

    /// Enable or disable baseline subtraction
    pub fn with_intensity_offset(mut self, enabled: bool) -> Self {
        self.auto_intensity_offset = enabled;
        self
    }

    /// Use a specific onset detector
    pub fn with_detector(mut self, detector: OffsetDetector) -> Self {
        self.detector = detector;
        self
    }

    /// True when at least one correction is enabled
    pub fn is_enabled(&self) -> bool {
        self.auto_time_offset || self.auto_intensity_offset
    }

    /// Detect the onset once and apply the enabled corrections in place.
    ///
    /// Returns `None` when nothing was applied (corrections disabled or empty
    /// transient).
    pub fn apply(&self, transient: &mut Transient) -> Result<Option<AppliedOffset>, OffsetError> {
        if !self.is_enabled() || transient.is_empty() {
            return Ok(None);
        }

        let index = self.detector.find_offset_index(transient.intensity())?;
        self.apply_at(transient, index).map(Some)
    }

    /// Apply the enabled corrections for a known onset index
    pub fn apply_at(
        &self,
        transient: &mut Transient,
        index: usize,
    ) -> Result<AppliedOffset, OffsetError> {
        let time_offset = if self.auto_time_offset {
            Some(transient.apply_time_offset(index)?)
        } else {
            None
        };
        let intensity_offset = if self.auto_intensity_offset {
            Some(transient.apply_intensity_offset(index)?)
        } else {
            None
        };

        debug!(
            "Offset correction at index {}: time offset {:?}, intensity offset {:?}",
            index, time_offset, intensity_offset
        );

        Ok(AppliedOffset {
            index,
            time_offset,
            intensity_offset,
        })
    }
}
