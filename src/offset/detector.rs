use super::OffsetError;

/// Default rolling window length in samples
pub const DEFAULT_WINDOW: usize = 10;

/// Default threshold in rolling standard deviations
pub const DEFAULT_K: f64 = 2.0;

/// Default number of samples the onset is moved ahead of the first flagged sample
pub const DEFAULT_LOOKAHEAD: usize = 3;

/// Rolling-statistics edge detector for the onset of a transient
///
/// A sample is flagged when it exceeds the mean of the trailing window by
/// more than `k` sample standard deviations. The rolling window only
/// stabilizes a few samples after the true rise, so the flags are moved
/// `lookahead` samples earlier before the first one is taken as the onset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetDetector {
    /// Number of consecutive samples in the rolling window
    pub window: usize,
    /// Threshold multiplier on the rolling standard deviation
    pub k: f64,
    /// Backward shift applied to the flags
    pub lookahead: usize,
}

impl Default for OffsetDetector {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            k: DEFAULT_K,
            lookahead: DEFAULT_LOOKAHEAD,
        }
    }
}

impl OffsetDetector {
    /// Create a detector with the given window and threshold
    pub fn new(window: usize, k: f64) -> Self {
        Self {
            window,
            k,
            ..Default::default()
        }
    }

    /// Set the backward shift applied to the flags
    pub fn with_lookahead(mut self, lookahead: usize) -> Self {
        self.lookahead = lookahead;
        self
    }

    /// Flag every sample that rises above `mean + k * std` of its trailing window.
    ///
    /// Samples before the first full window have no statistics and are never
    /// flagged.
    pub fn flags(&self, intensity: &[f64]) -> Result<Vec<bool>, OffsetError> {
        if self.window < 2 {
            return Err(OffsetError::InvalidWindow(self.window));
        }

        let mut flags = vec![false; intensity.len()];
        for (end, window) in intensity.windows(self.window).enumerate() {
            let i = end + self.window - 1;
            let (mean, std) = mean_and_std(window);
            flags[i] = intensity[i] > mean + self.k * std;
        }
        Ok(flags)
    }

    /// Locate the onset index of the transient.
    ///
    /// Returns [`OffsetError::NotFound`] when no sample is flagged.
    pub fn find_offset_index(&self, intensity: &[f64]) -> Result<usize, OffsetError> {
        let flags = self.flags(intensity)?;
        flags
            .iter()
            .skip(self.lookahead)
            .position(|&flagged| flagged)
            .ok_or(OffsetError::NotFound { k: self.k })
    }
}

/// Mean and sample standard deviation (n - 1 denominator)
fn mean_and_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let sum_sq = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    (mean, (sum_sq / (n - 1.0)).sqrt())
}
