use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

use tlab::export::{self, ToRecordBatch};
use tlab::streak::{AxisRange, StreakRecord};

use super::{Config, OffsetArgs};

fn decode(file: &Path) -> Result<StreakRecord> {
    if !file.exists() {
        anyhow::bail!("Input file does not exist: {}", file.display());
    }
    info!("Decoding streak file: {}", file.display());
    StreakRecord::decode(file)
        .with_context(|| format!("Failed to decode streak file: {}", file.display()))
}

fn write<T: ToRecordBatch>(
    output: &Path,
    table: &T,
    record: &StreakRecord,
    config: &Config,
) -> Result<()> {
    let metadata = export::streak_metadata(record)?;
    let stats = export::write_table(output, table, &config.export_config(), &metadata)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("{} to {}", stats, output.display());
    Ok(())
}

/// Export the long-form table
pub fn run_table(file: PathBuf, output: PathBuf, config: &Config) -> Result<()> {
    let record = decode(&file)?;
    write(&output, record.long_table(), &record, config)
}

/// Export the time-integrated spectrum
pub fn run_spectrum(
    file: PathBuf,
    output: PathBuf,
    time_range: Option<AxisRange>,
    config: &Config,
) -> Result<()> {
    let record = decode(&file)?;
    if let Some((lo, hi)) = time_range {
        info!("Time window: {} .. {} ns", lo, hi);
    }
    let spectrum = record.to_hdf(time_range);
    write(&output, &spectrum, &record, config)
}

/// Export the wavelength-integrated transient
pub fn run_transient(
    file: PathBuf,
    output: PathBuf,
    wavelength_range: Option<AxisRange>,
    offset: OffsetArgs,
    config: &Config,
) -> Result<()> {
    let record = decode(&file)?;
    if let Some((lo, hi)) = wavelength_range {
        info!("Wavelength window: {} .. {} nm", lo, hi);
    }
    let transient = record
        .to_vdf(wavelength_range, &offset.correction(config))
        .context("Failed to compute transient")?;
    write(&output, &transient, &record, config)
}
