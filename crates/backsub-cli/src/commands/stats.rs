use std::path::PathBuf;

use anyhow::Result;
use backsub_core::accumulate::stdev::VariancePolicy;
use backsub_core::calibrate::config::{CalibrationConfig, Statistic};
use backsub_core::consts::{
    DEFAULT_BRIGHTNESS_OUTPUT, DEFAULT_CHROMA_OUTPUT, DEFAULT_FILENAME_EXTENSION,
    DEFAULT_FILENAME_PREFIX, DEFAULT_FRAME_COUNT, DEFAULT_HEIGHT, DEFAULT_INDEX_DIGITS,
    DEFAULT_MEAN_OUTPUT, DEFAULT_START_INDEX, DEFAULT_STDDEV_OUTPUT, DEFAULT_WIDTH,
};
use backsub_core::io::sequence::FrameSequence;
use clap::Args;

use super::run::execute;

#[derive(Args)]
pub struct SequenceArgs {
    /// Directory holding the numbered frames
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// File name prefix before the frame index
    #[arg(long, default_value = DEFAULT_FILENAME_PREFIX)]
    pub prefix: String,

    /// File name suffix after the frame index
    #[arg(long, default_value = DEFAULT_FILENAME_EXTENSION)]
    pub ext: String,

    /// Index of the first frame
    #[arg(long, default_value_t = DEFAULT_START_INDEX)]
    pub start: usize,

    /// Number of frames to reduce
    #[arg(short = 'n', long, default_value_t = DEFAULT_FRAME_COUNT)]
    pub count: usize,

    /// Zero-padded width of the frame index
    #[arg(long, default_value_t = DEFAULT_INDEX_DIGITS)]
    pub digits: usize,

    /// Expected frame width in pixels
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Expected frame height in pixels
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,
}

impl SequenceArgs {
    pub fn sequence(&self) -> FrameSequence {
        FrameSequence {
            directory: self.dir.clone(),
            prefix: self.prefix.clone(),
            extension: self.ext.clone(),
            start_index: self.start,
            frame_count: self.count,
            index_digits: self.digits,
        }
    }

    fn config(&self, statistic: Statistic) -> CalibrationConfig {
        CalibrationConfig {
            width: self.width,
            height: self.height,
            statistic,
            sequence: self.sequence(),
            ..Default::default()
        }
    }
}

#[derive(Args)]
pub struct MeanArgs {
    #[command(flatten)]
    pub sequence: SequenceArgs,

    /// Output file path
    #[arg(short, long, default_value = DEFAULT_MEAN_OUTPUT)]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct StdevArgs {
    #[command(flatten)]
    pub sequence: SequenceArgs,

    /// Fail on negative variance instead of clamping it to zero
    #[arg(long)]
    pub strict: bool,

    /// Output file path
    #[arg(short, long, default_value = DEFAULT_STDDEV_OUTPUT)]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct DistortionArgs {
    #[command(flatten)]
    pub sequence: SequenceArgs,

    /// Fail on negative variance instead of clamping it to zero
    #[arg(long)]
    pub strict: bool,

    /// Brightness distortion output path
    #[arg(short = 'o', long, default_value = DEFAULT_BRIGHTNESS_OUTPUT)]
    pub brightness_output: PathBuf,

    /// Chromaticity distortion output path
    #[arg(long, default_value = DEFAULT_CHROMA_OUTPUT)]
    pub chroma_output: PathBuf,
}

fn policy(strict: bool) -> VariancePolicy {
    if strict {
        VariancePolicy::Strict
    } else {
        VariancePolicy::Clamp
    }
}

pub fn run_mean(args: &MeanArgs) -> Result<()> {
    let config = CalibrationConfig {
        output: Some(args.output.clone()),
        ..args.sequence.config(Statistic::Mean)
    };
    execute(&config)
}

pub fn run_stdev(args: &StdevArgs) -> Result<()> {
    let config = CalibrationConfig {
        output: Some(args.output.clone()),
        variance_policy: policy(args.strict),
        ..args.sequence.config(Statistic::StdDev)
    };
    execute(&config)
}

pub fn run_distortion(args: &DistortionArgs) -> Result<()> {
    let config = CalibrationConfig {
        output: Some(args.brightness_output.clone()),
        chroma_output: Some(args.chroma_output.clone()),
        variance_policy: policy(args.strict),
        ..args.sequence.config(Statistic::Distortion)
    };
    execute(&config)
}
