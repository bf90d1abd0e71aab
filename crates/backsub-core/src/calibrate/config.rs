use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::accumulate::stdev::VariancePolicy;
use crate::consts::{
    DEFAULT_BRIGHTNESS_OUTPUT, DEFAULT_CHROMA_OUTPUT, DEFAULT_HEIGHT, DEFAULT_MEAN_OUTPUT,
    DEFAULT_STDDEV_OUTPUT, DEFAULT_WIDTH, MAX_INDEX_DIGITS,
};
use crate::error::{BacksubError, Result};
use crate::io::sequence::FrameSequence;

/// Per-pixel statistic computed by a calibration run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statistic {
    #[default]
    Mean,
    StdDev,
    /// Mean/stddev pass followed by a brightness/chromaticity distortion pass.
    Distortion,
}

impl std::fmt::Display for Statistic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mean => write!(f, "Mean"),
            Self::StdDev => write!(f, "Standard Deviation"),
            Self::Distortion => write!(f, "Distortion"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    pub width: usize,
    pub height: usize,
    pub statistic: Statistic,
    pub variance_policy: VariancePolicy,
    /// Primary output. Defaults to `average.png`, `stdev.png` or
    /// `brightness.png` depending on `statistic`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    /// Chromaticity output of a distortion run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chroma_output: Option<PathBuf>,
    pub sequence: FrameSequence,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            statistic: Statistic::default(),
            variance_policy: VariancePolicy::default(),
            output: None,
            chroma_output: None,
            sequence: FrameSequence::default(),
        }
    }
}

impl CalibrationConfig {
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            PathBuf::from(match self.statistic {
                Statistic::Mean => DEFAULT_MEAN_OUTPUT,
                Statistic::StdDev => DEFAULT_STDDEV_OUTPUT,
                Statistic::Distortion => DEFAULT_BRIGHTNESS_OUTPUT,
            })
        })
    }

    pub fn chroma_output_path(&self) -> PathBuf {
        self.chroma_output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CHROMA_OUTPUT))
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(BacksubError::InvalidConfig(format!(
                "image dimensions must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.sequence.frame_count == 0 {
            return Err(BacksubError::InvalidConfig(
                "frame_count must be at least 1".into(),
            ));
        }
        let seq = &self.sequence;
        if seq.start_index.checked_add(seq.frame_count).is_none() {
            return Err(BacksubError::InvalidConfig(format!(
                "sequence of {} frames starting at {} overflows the index range",
                seq.frame_count, seq.start_index
            )));
        }
        if seq.index_digits > MAX_INDEX_DIGITS {
            return Err(BacksubError::InvalidConfig(format!(
                "index_digits must be at most {MAX_INDEX_DIGITS}, got {}",
                seq.index_digits
            )));
        }
        if self.statistic == Statistic::Distortion
            && self.output_path() == self.chroma_output_path()
        {
            return Err(BacksubError::InvalidConfig(
                "brightness and chromaticity outputs must differ".into(),
            ));
        }
        Ok(())
    }
}
