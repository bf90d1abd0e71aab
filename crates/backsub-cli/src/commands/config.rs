use std::path::PathBuf;

use anyhow::{Context, Result};
use backsub_core::calibrate::config::{CalibrationConfig, Statistic};
use clap::{Args, ValueEnum};

#[derive(Clone, ValueEnum)]
pub enum StatisticArg {
    Mean,
    Stdev,
    Distortion,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Statistic the generated config computes
    #[arg(long, value_enum, default_value = "mean")]
    pub statistic: StatisticArg,

    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save a default CalibrationConfig as TOML.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let statistic = match args.statistic {
        StatisticArg::Mean => Statistic::Mean,
        StatisticArg::Stdev => Statistic::StdDev,
        StatisticArg::Distortion => Statistic::Distortion,
    };
    let mut config = CalibrationConfig {
        statistic,
        ..Default::default()
    };
    config.output = Some(config.output_path());
    if statistic == Statistic::Distortion {
        config.chroma_output = Some(config.chroma_output_path());
    }
    let toml_str = toml::to_string_pretty(&config)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Default config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
