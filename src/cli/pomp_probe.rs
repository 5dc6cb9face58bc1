use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use tlab::export;
use tlab::pomp_probe::{PompProbeOptions, PompProbePair, PompProbeRecord};

use super::{Config, OffsetArgs};

fn options(encoding: Option<String>, offset: OffsetArgs, config: &Config) -> PompProbeOptions {
    PompProbeOptions {
        encoding: config.encoding(encoding),
        correction: offset.correction(config),
        ..Default::default()
    }
}

/// Convert a single reading
pub fn run_reading(
    file: PathBuf,
    output: PathBuf,
    encoding: Option<String>,
    offset: OffsetArgs,
    config: &Config,
) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("Input file does not exist: {}", file.display());
    }

    let options = options(encoding, offset, config);
    let reading = PompProbeRecord::from_source(&file, &options)
        .with_context(|| format!("Failed to read pump-probe file: {}", file.display()))?;

    match reading.applied_offset() {
        Some(applied) => info!("Onset at row {}", applied.index),
        None => info!("No offset correction applied"),
    }

    let stats = export::write_table(&output, &reading, &config.export_config(), &[])
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("{} to {}", stats, output.display());
    Ok(())
}

/// Combine an RR/RL pair into a spin polarization table
pub fn run_polarization(
    rr: PathBuf,
    rl: PathBuf,
    output: PathBuf,
    encoding: Option<String>,
    config: &Config,
) -> Result<()> {
    for file in [&rr, &rl] {
        if !file.exists() {
            anyhow::bail!("Input file does not exist: {}", file.display());
        }
    }

    let options = PompProbeOptions {
        encoding: config.encoding(encoding),
        ..Default::default()
    }
    .with_detector(config.detector());

    let pair = PompProbePair::from_readings_with(&rr, &rl, &options)
        .context("Failed to read RR/RL pair")?;
    info!("Paired {} rows", pair.rr().len());

    let stats = export::write_table(&output, pair.polarization(), &config.export_config(), &[])
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("{} to {}", stats, output.display());
    Ok(())
}
