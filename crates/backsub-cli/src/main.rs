mod commands;
mod progress;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "backsub", about = "Per-pixel background calibration statistics")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Average a frame sequence into a mean image
    Mean(commands::stats::MeanArgs),
    /// Per-pixel standard deviation of a frame sequence
    Stdev(commands::stats::StdevArgs),
    /// Brightness and chromaticity distortion against the sequence's own background
    Distortion(commands::stats::DistortionArgs),
    /// Run a calibration described by a TOML config file
    Run(commands::run::RunArgs),
    /// Print or save a default calibration config
    Config(commands::config::ConfigArgs),
    /// List the frames a calibration would read
    Info(commands::info::InfoArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Mean(args) => commands::stats::run_mean(args),
        Commands::Stdev(args) => commands::stats::run_stdev(args),
        Commands::Distortion(args) => commands::stats::run_distortion(args),
        Commands::Run(args) => commands::run::run(args),
        Commands::Config(args) => commands::config::run(args),
        Commands::Info(args) => commands::info::run(args),
    }
}
