pub mod config;
mod runner;
mod types;

pub use runner::{run_calibration, run_calibration_reported};
pub use types::{CalibrationStage, CalibrationSummary, ProgressReporter};
