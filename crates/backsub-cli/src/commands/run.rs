use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use backsub_core::calibrate::config::CalibrationConfig;
use backsub_core::calibrate::run_calibration_reported;
use clap::Args;
use tracing::debug;

use crate::progress::BarReporter;
use crate::summary::{print_calibration_summary, print_outputs};

#[derive(Args)]
pub struct RunArgs {
    /// Calibration config file (TOML)
    #[arg(long)]
    pub config: PathBuf,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let contents = std::fs::read_to_string(&args.config)
        .with_context(|| format!("Failed to read config {}", args.config.display()))?;
    let config: CalibrationConfig =
        toml::from_str(&contents).context("Invalid calibration config")?;
    debug!(path = %args.config.display(), ?config, "Loaded calibration config");
    execute(&config)
}

/// Print the run summary, reduce the sequence with progress bars and report
/// the written outputs.
pub fn execute(config: &CalibrationConfig) -> Result<()> {
    config.validate()?;
    print_calibration_summary(config);

    let reporter = Arc::new(BarReporter::new()?);
    let summary = run_calibration_reported(config, reporter)?;

    print_outputs(&summary);
    Ok(())
}
