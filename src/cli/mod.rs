use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod info;
mod pomp_probe;
mod streak;

pub use config::Config;

/// tlab - Streak-camera and pump-probe spectroscopy data tools
#[derive(Parser)]
#[command(name = "tlab")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Offset correction switches shared by the transient commands
#[derive(clap::Args, Debug, Clone, Copy)]
pub struct OffsetArgs {
    /// Keep the raw time axis instead of zeroing it at the onset
    #[arg(long)]
    no_time_offset: bool,

    /// Keep the raw intensity instead of subtracting the pre-onset baseline
    #[arg(long)]
    no_intensity_offset: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Display the header, axes and acquisition settings of a streak file
    Info {
        /// Input streak image
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export the long-form table of a streak file
    Table {
        /// Input streak image
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output file (.parquet or .csv)
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },

    /// Export the time-integrated spectrum of a streak file
    Spectrum {
        /// Input streak image
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output file (.parquet or .csv)
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Inclusive time window in ns
        #[arg(long, num_args = 2, value_names = ["LO", "HI"], allow_negative_numbers = true)]
        time_range: Option<Vec<f64>>,
    },

    /// Export the wavelength-integrated transient of a streak file
    Transient {
        /// Input streak image
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output file (.parquet or .csv)
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Inclusive wavelength window in nm
        #[arg(long, num_args = 2, value_names = ["LO", "HI"], allow_negative_numbers = true)]
        wavelength_range: Option<Vec<f64>>,

        #[command(flatten)]
        offset: OffsetArgs,
    },

    /// Convert a pump-probe reading
    PompProbe {
        /// Input CSV reading
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output file (.parquet or .csv)
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Text encoding of the reading (default: cp932)
        #[arg(short, long)]
        encoding: Option<String>,

        #[command(flatten)]
        offset: OffsetArgs,
    },

    /// Compute the spin polarization of an RR/RL pair
    Polarization {
        /// RR reading
        #[arg(value_name = "RR")]
        rr: PathBuf,

        /// RL reading
        #[arg(value_name = "RL")]
        rl: PathBuf,

        /// Output file (.parquet or .csv)
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Text encoding of both readings (default: cp932)
        #[arg(short, long)]
        encoding: Option<String>,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Info { file, json } => info::run(file, json),
        Commands::Table { file, output } => streak::run_table(file, output, &config),
        Commands::Spectrum {
            file,
            output,
            time_range,
        } => streak::run_spectrum(file, output, axis_range(time_range), &config),
        Commands::Transient {
            file,
            output,
            wavelength_range,
            offset,
        } => streak::run_transient(file, output, axis_range(wavelength_range), offset, &config),
        Commands::PompProbe {
            file,
            output,
            encoding,
            offset,
        } => pomp_probe::run_reading(file, output, encoding, offset, &config),
        Commands::Polarization {
            rr,
            rl,
            output,
            encoding,
        } => pomp_probe::run_polarization(rr, rl, output, encoding, &config),
    }
}

/// clap guarantees two values when the flag is present
fn axis_range(values: Option<Vec<f64>>) -> Option<(f64, f64)> {
    match values.as_deref() {
        Some([lo, hi]) => Some((*lo, *hi)),
        _ => None,
    }
}

impl OffsetArgs {
    fn correction(&self, config: &Config) -> tlab::offset::OffsetCorrection {
        tlab::offset::OffsetCorrection::default()
            .with_time_offset(!self.no_time_offset)
            .with_intensity_offset(!self.no_intensity_offset)
            .with_detector(config.detector())
    }
}
