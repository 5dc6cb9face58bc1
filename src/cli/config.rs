//! TOML configuration file support.
//!
//! Settings shared by several subcommands can be kept in a config file
//! instead of being repeated on the command line:
//!
//! ```toml
//! # tlab.toml
//! [offset]
//! window = 10
//! k = 2.0
//! lookahead = 3
//!
//! [pomp_probe]
//! encoding = "cp932"
//!
//! [export]
//! compression_level = 3
//! row_group_size = 100000
//! ```
//!
//! Command-line flags take precedence over the file, which takes precedence
//! over the built-in defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use tlab::export::ExportConfig;
use tlab::offset::OffsetDetector;

/// Root configuration structure for tlab.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Onset detector settings.
    #[serde(default)]
    pub offset: OffsetConfig,

    /// Pump-probe reader settings.
    #[serde(default)]
    pub pomp_probe: PompProbeConfig,

    /// Table export settings.
    #[serde(default)]
    pub export: ExportSection,
}

/// Rolling-statistics detector parameters.
#[derive(Debug, Default, Deserialize)]
pub struct OffsetConfig {
    /// Rolling window length in samples.
    pub window: Option<usize>,

    /// Threshold in rolling standard deviations.
    pub k: Option<f64>,

    /// Samples the onset is moved ahead of the first flagged sample.
    pub lookahead: Option<usize>,
}

/// Pump-probe CSV settings.
#[derive(Debug, Default, Deserialize)]
pub struct PompProbeConfig {
    /// Text encoding of the CSV files.
    pub encoding: Option<String>,
}

/// Parquet output settings.
#[derive(Debug, Default, Deserialize)]
pub struct ExportSection {
    /// ZSTD compression level (1-22).
    pub compression_level: Option<i32>,

    /// Rows per Parquet row group.
    pub row_group_size: Option<usize>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Load the file if one was given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Onset detector with configured values over the defaults.
    pub fn detector(&self) -> OffsetDetector {
        let defaults = OffsetDetector::default();
        OffsetDetector {
            window: self.offset.window.unwrap_or(defaults.window),
            k: self.offset.k.unwrap_or(defaults.k),
            lookahead: self.offset.lookahead.unwrap_or(defaults.lookahead),
        }
    }

    /// Encoding from the command line, then the file.
    pub fn encoding(&self, flag: Option<String>) -> Option<String> {
        flag.or_else(|| self.pomp_probe.encoding.clone())
    }

    /// Export configuration with configured values over the defaults.
    pub fn export_config(&self) -> ExportConfig {
        let defaults = ExportConfig::default();
        ExportConfig {
            compression_level: self
                .export
                .compression_level
                .unwrap_or(defaults.compression_level),
            row_group_size: self.export.row_group_size.unwrap_or(defaults.row_group_size),
            ..defaults
        }
    }
}
