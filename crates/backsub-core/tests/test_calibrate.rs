use std::sync::{Arc, Mutex};

use backsub_core::calibrate::config::{CalibrationConfig, Statistic};
use backsub_core::calibrate::{
    run_calibration, run_calibration_reported, CalibrationStage, ProgressReporter,
};
use backsub_core::error::BacksubError;
use backsub_core::frame::Frame;
use backsub_core::accumulate::stdev::VariancePolicy;
use backsub_core::io::image_io::{decode_rgb, partial_path};
use backsub_core::io::sequence::FrameLoader;

mod common;
use common::{gradient_frame, test_config, uniform_frame, write_sequence};

#[derive(Default)]
struct RecordingReporter {
    stages: Mutex<Vec<(CalibrationStage, Option<usize>)>>,
    advances: Mutex<Vec<usize>>,
}

impl ProgressReporter for RecordingReporter {
    fn begin_stage(&self, stage: CalibrationStage, total_items: Option<usize>) {
        self.stages.lock().unwrap().push((stage, total_items));
    }

    fn advance(&self, items_done: usize) {
        self.advances.lock().unwrap().push(items_done);
    }
}

fn load_output(path: &std::path::Path, width: usize, height: usize) -> Frame {
    let data = decode_rgb(path).unwrap();
    assert_eq!(data.dim(), (height, width, 3));
    Frame::new(data, 0)
}

#[test]
fn test_mean_run_writes_average() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path(), 4, 3, 2, Statistic::Mean);
    write_sequence(
        &config.sequence,
        &[uniform_frame(4, 3, 100, 100), uniform_frame(4, 3, 100, 101)],
    );

    let summary = run_calibration(&config).unwrap();
    assert_eq!(summary.frames, 2);
    assert_eq!(summary.outputs, vec![dir.path().join("out.png")]);

    let out = load_output(&summary.outputs[0], 4, 3);
    assert_eq!(out.pixel(0, 0), [100, 100, 100]);
}

#[test]
fn test_stddev_run_writes_stdev() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path(), 2, 2, 2, Statistic::StdDev);
    write_sequence(
        &config.sequence,
        &[uniform_frame(2, 2, 0, 100), uniform_frame(2, 2, 255, 101)],
    );

    let summary = run_calibration(&config).unwrap();
    let out = load_output(&summary.outputs[0], 2, 2);
    assert_eq!(out.pixel(1, 1), [128, 128, 128]);
}

#[test]
fn test_distortion_run_writes_two_images() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path(), 5, 5, 4, Statistic::Distortion);
    let frames: Vec<_> = (100..104).map(|i| gradient_frame(5, 5, 20, i)).collect();
    write_sequence(&config.sequence, &frames);

    let reporter = Arc::new(RecordingReporter::default());
    let summary = run_calibration_reported(&config, reporter.clone()).unwrap();
    assert_eq!(
        summary.outputs,
        vec![dir.path().join("out.png"), dir.path().join("chroma.png")]
    );
    for path in &summary.outputs {
        let out = load_output(path, 5, 5);
        assert!(out.data.iter().all(|&p| p == 0));
    }

    let stages = reporter.stages.lock().unwrap().clone();
    assert_eq!(
        stages,
        vec![
            (CalibrationStage::Accumulating, Some(4)),
            (CalibrationStage::DistortionPass, Some(4)),
            (CalibrationStage::Finalizing, None),
            (CalibrationStage::Writing, Some(2)),
        ]
    );
}

#[test]
fn test_progress_counts_every_frame() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path(), 2, 2, 7, Statistic::Mean);
    let frames: Vec<_> = (100..107).map(|i| uniform_frame(2, 2, 3, i)).collect();
    write_sequence(&config.sequence, &frames);

    let reporter = Arc::new(RecordingReporter::default());
    run_calibration_reported(&config, reporter.clone()).unwrap();
    let stages = reporter.stages.lock().unwrap().clone();
    assert_eq!(stages[0], (CalibrationStage::Accumulating, Some(7)));
    // 7 frame advances, then one for the written output
    let advances = reporter.advances.lock().unwrap().clone();
    assert_eq!(advances, vec![1, 2, 3, 4, 5, 6, 7, 1]);
}

#[test]
fn test_missing_frame_aborts_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path(), 3, 3, 4, Statistic::StdDev);
    write_sequence(
        &config.sequence,
        &[
            uniform_frame(3, 3, 1, 100),
            uniform_frame(3, 3, 2, 101),
            uniform_frame(3, 3, 4, 103),
        ],
    );

    match run_calibration(&config) {
        Err(BacksubError::FrameLoad { index, .. }) => assert_eq!(index, 102),
        other => panic!("expected FrameLoad, got {other:?}"),
    }
    assert!(!config.output_path().exists());
}

#[test]
fn test_mismatched_frame_aborts_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path(), 3, 3, 2, Statistic::Mean);
    write_sequence(
        &config.sequence,
        &[uniform_frame(3, 3, 1, 100), uniform_frame(4, 3, 1, 101)],
    );

    assert!(matches!(
        run_calibration(&config),
        Err(BacksubError::DimensionMismatch { index: 101, .. })
    ));
    assert!(!config.output_path().exists());
}

#[test]
fn test_only_configured_range_is_read() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path(), 2, 2, 2, Statistic::Mean);
    // Frame 102 lies outside the configured range and would skew the mean
    write_sequence(
        &config.sequence,
        &[
            uniform_frame(2, 2, 10, 100),
            uniform_frame(2, 2, 20, 101),
            uniform_frame(2, 2, 250, 102),
        ],
    );
    let loader = FrameLoader::new(config.sequence.clone(), 2, 2);
    assert_eq!(loader.indices(), 100..102);

    let summary = run_calibration(&config).unwrap();
    let out = load_output(&summary.outputs[0], 2, 2);
    assert_eq!(out.pixel(0, 0), [15, 15, 15]);
}

#[test]
fn test_invalid_config_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path(), 2, 2, 0, Statistic::Mean);
    assert!(matches!(
        run_calibration(&config),
        Err(BacksubError::InvalidConfig(_))
    ));

    config.sequence.frame_count = 1;
    config.width = 0;
    assert!(matches!(
        run_calibration(&config),
        Err(BacksubError::InvalidConfig(_))
    ));
}

#[test]
fn test_default_output_names() {
    let mut config = CalibrationConfig::default();
    assert_eq!(config.output_path(), std::path::PathBuf::from("average.png"));
    config.statistic = Statistic::StdDev;
    assert_eq!(config.output_path(), std::path::PathBuf::from("stdev.png"));
    config.statistic = Statistic::Distortion;
    assert_eq!(config.output_path(), std::path::PathBuf::from("brightness.png"));
    assert_eq!(
        config.chroma_output_path(),
        std::path::PathBuf::from("chromaticity.png")
    );
}

#[test]
fn test_failed_second_output_leaves_no_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path(), 3, 3, 2, Statistic::Distortion);
    config.chroma_output = Some(dir.path().join("no_such_dir").join("chroma.png"));
    write_sequence(
        &config.sequence,
        &[uniform_frame(3, 3, 40, 100), uniform_frame(3, 3, 60, 101)],
    );

    assert!(run_calibration(&config).is_err());
    let brightness = config.output_path();
    assert!(!brightness.exists());
    assert!(!partial_path(&brightness).exists());
    assert!(!config.chroma_output_path().exists());
}

#[test]
fn test_successful_run_leaves_no_partial_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path(), 3, 3, 2, Statistic::Distortion);
    write_sequence(
        &config.sequence,
        &[uniform_frame(3, 3, 40, 100), uniform_frame(3, 3, 60, 101)],
    );

    let summary = run_calibration(&config).unwrap();
    for path in &summary.outputs {
        assert!(path.exists());
        assert!(!partial_path(path).exists());
    }
}

#[test]
fn test_overflowing_index_range_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path(), 2, 2, 2, Statistic::Mean);
    config.sequence.start_index = usize::MAX;
    assert!(matches!(
        run_calibration(&config),
        Err(BacksubError::InvalidConfig(_))
    ));

    config.sequence.start_index = usize::MAX - 2;
    config.sequence.index_digits = 20;
    config.sequence.frame_count = 2;
    assert!(config.validate().is_ok());
}

#[test]
fn test_excessive_index_digits_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path(), 2, 2, 2, Statistic::Mean);
    config.sequence.index_digits = usize::MAX;
    assert!(matches!(
        run_calibration(&config),
        Err(BacksubError::InvalidConfig(_))
    ));
}

#[test]
fn test_strict_run_aborts_on_negative_variance() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path(), 2, 2, 3, Statistic::StdDev);
    config.variance_policy = VariancePolicy::Strict;
    let frames: Vec<_> = (100..103).map(|i| uniform_frame(2, 2, 205, i)).collect();
    write_sequence(&config.sequence, &frames);

    assert!(matches!(
        run_calibration(&config),
        Err(BacksubError::Arithmetic { x: 0, y: 0, channel: 0, .. })
    ));
    assert!(!config.output_path().exists());

    config.variance_policy = VariancePolicy::Clamp;
    let summary = run_calibration(&config).unwrap();
    let out = load_output(&summary.outputs[0], 2, 2);
    assert!(out.data.iter().all(|&p| p == 0));
}
