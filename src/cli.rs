//! Command-line arguments.

use std::path::{Path, PathBuf};

use clap::Parser;

/// Parsed CLI arguments.
#[derive(Debug, Parser)]
#[command(name = "peak-shift")]
#[command(
    about = "Find peak consumption hours and estimate savings from shifting them to the night tariff",
    long_about = None
)]
pub struct Cli {
    /// Consumption table to analyse (.csv or .xlsx, columns "Hour" and "Consumption (kWh)")
    #[arg(short, long, conflicts_with = "sample")]
    pub input: Option<PathBuf>,

    /// Analyse the built-in sample day (default when no --input is given)
    #[arg(long)]
    pub sample: bool,

    /// Tariff per kWh; overrides the config file
    #[arg(short, long)]
    pub tariff: Option<f64>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the annotated table as an XLSX workbook
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Write the annotated table as CSV
    #[arg(long)]
    pub csv_out: Option<PathBuf>,

    /// Print the analysis as JSON instead of a text report
    #[arg(long)]
    pub json: bool,

    /// Start the REST API server after the analysis
    #[cfg(feature = "api")]
    #[arg(long)]
    pub serve: bool,

    /// API server port
    #[cfg(feature = "api")]
    #[arg(long, default_value_t = 3000)]
    pub port: u16,

    /// Open the interactive terminal view
    #[cfg(feature = "tui")]
    #[arg(long, conflicts_with = "json")]
    pub tui: bool,
}

impl Cli {
    /// File to analyse, or `None` for the sample day.
    ///
    /// `--sample` and `--input` are mutually exclusive; `--sample` only makes
    /// the default explicit.
    pub fn input_path(&self) -> Option<&Path> {
        if self.sample {
            None
        } else {
            self.input.as_deref()
        }
    }

    /// Parses `std::env::args`, exiting with usage on error.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses an explicit argument list (program name first).
    ///
    /// # Errors
    ///
    /// Returns the clap error for unknown or malformed arguments.
    pub fn parse_args_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(args)
    }
}
