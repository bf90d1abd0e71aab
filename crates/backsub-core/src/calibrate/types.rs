use std::path::PathBuf;

use super::config::Statistic;

/// Calibration stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalibrationStage {
    Accumulating,
    DistortionPass,
    Finalizing,
    Writing,
}

impl std::fmt::Display for CalibrationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Accumulating => write!(f, "Accumulating frames"),
            Self::DistortionPass => write!(f, "Measuring distortion"),
            Self::Finalizing => write!(f, "Finalizing"),
            Self::Writing => write!(f, "Writing output"),
        }
    }
}

/// Thread-safe progress reporting for a calibration run.
///
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new stage has started. `total_items` is the number of frames in
    /// this stage, if it iterates frames.
    fn begin_stage(&self, _stage: CalibrationStage, _total_items: Option<usize>) {}

    /// `items_done` frames of the current stage have been processed.
    fn advance(&self, _items_done: usize) {}

    fn finish_stage(&self) {}
}

pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}

/// What a completed run produced.
#[derive(Clone, Debug)]
pub struct CalibrationSummary {
    pub statistic: Statistic,
    pub frames: usize,
    pub width: usize,
    pub height: usize,
    pub outputs: Vec<PathBuf>,
}
