use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Chargescout - EV-charger siting analysis
#[derive(Parser, Debug)]
#[command(name = "chargescout")]
#[command(about = "Geospatial analysis of EV-charger rollout potential", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to a chargescout.toml configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory containing the source datasets
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze one location against every dataset
    Analyze(AnalyzeArgs),

    /// Verify the configured datasets are present and usable
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Latitude of the reference point, in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of the reference point, in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Postcode to resolve to coordinates (also selects the EV
    /// registration rows to report)
    #[arg(long)]
    pub postcode: Option<u32>,

    /// Search radius in kilometers
    #[arg(long)]
    pub radius: Option<f64>,

    /// Maximum distance for the plug-forecast nearest match, in kilometers
    #[arg(long)]
    pub cutoff: Option<f64>,

    /// Omit raw latitude/longitude columns from radius results
    #[arg(long)]
    pub no_coordinates: bool,

    /// Prompt for all inputs
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Show per-dataset file paths
    #[arg(long)]
    pub verbose: bool,
}
