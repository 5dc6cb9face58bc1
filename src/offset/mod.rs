//! # Offset Correction
//!
//! Detects the onset of a transient with rolling statistics and corrects the
//! transient so that:
//!
//! - the time axis is zero at the onset, and
//! - the mean of the pre-onset samples (the baseline) is zero.
//!
//! ```rust
//! use tlab::offset::{OffsetCorrection, OffsetDetector};
//! use tlab::series::Transient;
//!
//! let mut intensity = vec![0.0; 13];
//! intensity.extend(std::iter::repeat(100.0).take(10));
//! let time = (0..intensity.len()).map(|i| i as f64).collect();
//! let mut transient = Transient::new(time, intensity)?;
//!
//! let index = OffsetDetector::default().find_offset_index(transient.intensity())?;
//! assert_eq!(index, 10);
//!
//! OffsetCorrection::default().apply(&mut transient)?;
//! assert_eq!(transient.time()[index], 0.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod correction;
mod detector;
mod error;

#[cfg(test)]
mod tests;

pub use correction::{AppliedOffset, OffsetCorrection};
pub use detector::{OffsetDetector, DEFAULT_K, DEFAULT_LOOKAHEAD, DEFAULT_WINDOW};
pub use error::OffsetError;
