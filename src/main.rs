//! # tlab
//!
//! Command-line tools for streak-camera photoluminescence images and
//! pump-probe readings.
//!
//! ## Usage
//!
//! ```bash
//! # Inspect a streak image
//! tlab info sample.img
//!
//! # Time-integrated spectrum over the first nanosecond
//! tlab spectrum sample.img spectrum.csv --time-range 0 1
//!
//! # Transient around 490 nm, zeroed at the onset
//! tlab transient sample.img transient.parquet --wavelength-range 485 495
//!
//! # Spin polarization of an RR/RL pair
//! tlab polarization RR.csv RL.csv polarization.csv
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
