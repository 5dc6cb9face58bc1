use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use tlab::streak::{AcquisitionInfo, StreakRecord};

/// Summary printed by `tlab info`
#[derive(Debug, Serialize)]
struct StreakSummary {
    file: String,
    header: String,
    time_points: usize,
    wavelength_points: usize,
    time_range_ns: Option<(f32, f32)>,
    wavelength_range_nm: Option<(f32, f32)>,
    total_counts: u64,
    max_count: u32,
    metadata: Vec<String>,
    acquisition: AcquisitionInfo,
}

impl StreakSummary {
    fn new(file: &Path, record: &StreakRecord) -> Self {
        Self {
            file: file.display().to_string(),
            header: record.header().iter().map(|b| format!("{b:02x}")).collect(),
            time_points: record.time().len(),
            wavelength_points: record.wavelength().len(),
            time_range_ns: bounds(record.time()),
            wavelength_range_nm: bounds(record.wavelength()),
            total_counts: record.intensity().iter().map(|&v| u64::from(v)).sum(),
            max_count: record.intensity().iter().copied().max().unwrap_or(0),
            metadata: record
                .metadata()
                .iter()
                .map(|line| line.trim_end().to_string())
                .collect(),
            acquisition: record.acquisition_info(),
        }
    }
}

fn bounds(axis: &[f32]) -> Option<(f32, f32)> {
    Some((*axis.first()?, *axis.last()?))
}

/// Display information about a streak file
pub fn run(file: PathBuf, json: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let record = StreakRecord::decode(&file)
        .with_context(|| format!("Failed to decode streak file: {}", file.display()))?;
    let summary = StreakSummary::new(&file, &record);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Streak File Information");
    println!("=======================");
    println!("File: {}", summary.file);
    println!();

    println!("Image:");
    println!("  Time points: {}", summary.time_points);
    println!("  Wavelength points: {}", summary.wavelength_points);
    if let Some((lo, hi)) = summary.time_range_ns {
        println!("  Time range: {lo:.4} .. {hi:.4} ns");
    }
    if let Some((lo, hi)) = summary.wavelength_range_nm {
        println!("  Wavelength range: {lo:.3} .. {hi:.3} nm");
    }
    println!("  Total counts: {}", summary.total_counts);
    println!("  Max count: {}", summary.max_count);
    println!();

    println!("Header: {}", summary.header);
    println!();

    println!("Metadata Lines:");
    for line in &summary.metadata {
        let preview = if line.chars().count() > 100 {
            format!("{}... ({} bytes)", line.chars().take(100).collect::<String>(), line.len())
        } else {
            line.clone()
        };
        println!("  {}", preview);
    }
    println!();

    let acquisition = &summary.acquisition;
    println!("Acquisition:");
    if let Some(application) = &acquisition.application {
        println!(
            "  Application: {} {}",
            application,
            acquisition.version.as_deref().unwrap_or("")
        );
    }
    if let Some(date) = acquisition.date {
        println!("  Date: {}", date);
    }
    for (section, settings) in &acquisition.sections {
        println!("  {}:", section);
        for (key, value) in settings {
            println!("    {} = {}", key, value);
        }
    }

    Ok(())
}
