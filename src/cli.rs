//! CLI argument parsing for replication-curve

use crate::config::ConfigOverrides;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "replication-curve")]
#[command(version)]
#[command(
    about = "Average per-entity count trajectories into a 24 hour replication curve",
    long_about = None
)]
pub struct Cli {
    /// Semicolon-delimited event log (entity;tablet;timestamp_ms;count)
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Where to write the per-record time;count rows
    #[arg(short = 't', long = "transformed-output", value_name = "PATH")]
    pub transformed_output: Option<PathBuf>,

    /// Where to write the averaged minutes;count curve
    #[arg(short = 'o', long = "curve-output", value_name = "PATH")]
    pub curve_output: Option<PathBuf>,

    /// TOML file with path settings (flags take precedence)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Also write a JSON summary of the run
    #[arg(long = "summary-json", value_name = "FILE")]
    pub summary_json: Option<PathBuf>,

    /// Enable debug tracing on stderr
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Path flags as config overrides
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            input_path: self.input.clone(),
            transformed_output_path: self.transformed_output.clone(),
            curve_output_path: self.curve_output.clone(),
            summary_path: self.summary_json.clone(),
        }
    }
}
