use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::accumulate::distortion::DistortionAccumulator;
use crate::accumulate::mean::MeanAccumulator;
use crate::accumulate::stdev::StdDevAccumulator;
use crate::accumulate::Accumulator;
use crate::error::Result;
use crate::frame::StatImage;
use crate::io::image_io::save_stat_images;
use crate::io::sequence::FrameLoader;

use super::config::{CalibrationConfig, Statistic};
use super::types::{CalibrationStage, CalibrationSummary, NoOpReporter, ProgressReporter};

/// Run a calibration without progress reporting.
pub fn run_calibration(config: &CalibrationConfig) -> Result<CalibrationSummary> {
    run_calibration_reported(config, Arc::new(NoOpReporter))
}

/// Load every frame of the configured sequence, reduce it to the configured
/// statistic and write the result.
///
/// Outputs are written only after every frame has been folded in and the
/// statistic finalized; any failure leaves the output paths untouched.
pub fn run_calibration_reported(
    config: &CalibrationConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<CalibrationSummary> {
    config.validate()?;
    let (w, h) = (config.width, config.height);
    let loader = FrameLoader::new(config.sequence.clone(), w, h);
    let n = loader.frame_count();
    info!(
        frames = n,
        first = loader.sequence().start_index,
        width = w,
        height = h,
        statistic = %config.statistic,
        "Starting calibration"
    );

    let images: Vec<(StatImage, PathBuf)> = match config.statistic {
        Statistic::Mean => {
            let mut acc = MeanAccumulator::new(w, h, n);
            fold_sequence(&loader, &mut acc, CalibrationStage::Accumulating, &reporter)?;
            let image = finalize_stage(&acc, &reporter)?;
            vec![(image, config.output_path())]
        }
        Statistic::StdDev => {
            let mut acc = StdDevAccumulator::with_policy(w, h, n, config.variance_policy);
            fold_sequence(&loader, &mut acc, CalibrationStage::Accumulating, &reporter)?;
            let image = finalize_stage(&acc, &reporter)?;
            vec![(image, config.output_path())]
        }
        Statistic::Distortion => {
            let mut stats = StdDevAccumulator::with_policy(w, h, n, config.variance_policy);
            fold_sequence(&loader, &mut stats, CalibrationStage::Accumulating, &reporter)?;
            let model = stats.statistics()?;
            info!("Background model built, starting distortion pass");

            let mut acc = DistortionAccumulator::new(model, n);
            fold_sequence(&loader, &mut acc, CalibrationStage::DistortionPass, &reporter)?;
            let images = finalize_stage(&acc, &reporter)?;
            vec![
                (images.brightness, config.output_path()),
                (images.chromaticity, config.chroma_output_path()),
            ]
        }
    };

    reporter.begin_stage(CalibrationStage::Writing, Some(images.len()));
    save_stat_images(&images, |done| reporter.advance(done))?;
    reporter.finish_stage();

    let mut outputs = Vec::with_capacity(images.len());
    for (image, path) in images {
        info!(kind = %image.kind, output = %path.display(), "Output saved");
        outputs.push(path);
    }

    Ok(CalibrationSummary {
        statistic: config.statistic,
        frames: n,
        width: w,
        height: h,
        outputs,
    })
}

/// Fold every frame of `loader` into `acc`, in sequence order.
fn fold_sequence<A: Accumulator>(
    loader: &FrameLoader,
    acc: &mut A,
    stage: CalibrationStage,
    reporter: &Arc<dyn ProgressReporter>,
) -> Result<()> {
    reporter.begin_stage(stage, Some(loader.frame_count()));
    for (done, frame) in loader.frames().enumerate() {
        acc.accumulate(&frame?)?;
        reporter.advance(done + 1);
    }
    reporter.finish_stage();
    Ok(())
}

fn finalize_stage<A: Accumulator>(
    acc: &A,
    reporter: &Arc<dyn ProgressReporter>,
) -> Result<A::Output> {
    reporter.begin_stage(CalibrationStage::Finalizing, None);
    let output = acc.finalize()?;
    reporter.finish_stage();
    Ok(output)
}
