//! Integrated views of a long table.
//!
//! - [`horizontal`] sums over time for each wavelength (time-integrated spectrum).
//! - [`vertical`] sums over wavelength for each time (wavelength-integrated
//!   transient) and applies offset correction.
//!
//! Range bounds are inclusive on both ends. A range that selects nothing
//! produces an empty view.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::LongTable;
use crate::offset::{OffsetCorrection, OffsetError};
use crate::series::{Spectrum, Transient};

/// Inclusive `(lo, hi)` range on one axis
pub type AxisRange = (f64, f64);

/// Group key with IEEE total ordering
#[derive(Debug, Clone, Copy)]
struct AxisKey(f32);

impl AxisKey {
    fn new(value: f32) -> Self {
        // -0.0 and 0.0 are the same group
        if value == 0.0 {
            AxisKey(0.0)
        } else {
            AxisKey(value)
        }
    }
}

impl PartialEq for AxisKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for AxisKey {}

impl PartialOrd for AxisKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AxisKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Sum intensity over time for every wavelength.
///
/// `time_range` defaults to the full extent of the time column.
pub fn horizontal(table: &LongTable, time_range: Option<AxisRange>) -> Spectrum {
    let Some((lo, hi)) = time_range.or_else(|| extent(&table.time)) else {
        return Spectrum::default();
    };

    let groups = group_sum(
        table
            .time
            .iter()
            .zip(&table.wavelength)
            .zip(&table.intensity)
            .filter(|((time, _), _)| contains(lo, hi, **time))
            .map(|((_, &wavelength), &intensity)| (wavelength, intensity)),
    );

    let (wavelength, intensity) = groups.into_iter().map(|(key, sum)| (key.0, sum)).unzip();
    Spectrum {
        wavelength,
        intensity,
    }
}

/// Sum intensity over wavelength for every time, then apply `correction`.
///
/// `wavelength_range` defaults to the full extent of the wavelength column.
/// Offset detection is skipped for an empty selection.
pub fn vertical(
    table: &LongTable,
    wavelength_range: Option<AxisRange>,
    correction: &OffsetCorrection,
) -> Result<Transient, OffsetError> {
    let mut transient = vertical_sums(table, wavelength_range);
    correction.apply(&mut transient)?;
    Ok(transient)
}

/// Uncorrected per-time sums
pub fn vertical_sums(table: &LongTable, wavelength_range: Option<AxisRange>) -> Transient {
    let Some((lo, hi)) = wavelength_range.or_else(|| extent(&table.wavelength)) else {
        return Transient::default();
    };

    let groups = group_sum(
        table
            .time
            .iter()
            .zip(&table.wavelength)
            .zip(&table.intensity)
            .filter(|((_, wavelength), _)| contains(lo, hi, **wavelength))
            .map(|((&time, _), &intensity)| (time, intensity)),
    );

    let (time, intensity) = groups
        .into_iter()
        .map(|(key, sum)| (f64::from(key.0), sum as f64))
        .unzip();
    Transient::from_rows(time, intensity)
}

fn group_sum(rows: impl Iterator<Item = (f32, u32)>) -> BTreeMap<AxisKey, u64> {
    let mut groups = BTreeMap::new();
    for (key, value) in rows {
        *groups.entry(AxisKey::new(key)).or_insert(0u64) += u64::from(value);
    }
    groups
}

fn contains(lo: f64, hi: f64, value: f32) -> bool {
    let value = f64::from(value);
    lo <= value && value <= hi
}

/// Minimum and maximum of a column, ignoring NaN
pub(crate) fn extent(values: &[f32]) -> Option<AxisRange> {
    values
        .iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, &v| {
            let v = f64::from(v);
            match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
            }
        })
}
