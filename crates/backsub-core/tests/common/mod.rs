#![allow(dead_code)]

use std::path::Path;

use ndarray::Array3;

use backsub_core::calibrate::config::{CalibrationConfig, Statistic};
use backsub_core::frame::Frame;
use backsub_core::io::image_io::save_rgb;
use backsub_core::io::sequence::FrameSequence;

/// Frame with the same value in every pixel and channel.
pub fn uniform_frame(width: usize, height: usize, value: u8, index: usize) -> Frame {
    Frame::new(Array3::from_elem((height, width, 3), value), index)
}

/// Frame filled with one RGB colour.
pub fn color_frame(width: usize, height: usize, rgb: [u8; 3], index: usize) -> Frame {
    Frame::new(
        Array3::from_shape_fn((height, width, 3), |(_, _, c)| rgb[c]),
        index,
    )
}

/// Frame whose channels vary with position so pixels are distinguishable.
pub fn gradient_frame(width: usize, height: usize, offset: u8, index: usize) -> Frame {
    Frame::new(
        Array3::from_shape_fn((height, width, 3), |(y, x, c)| {
            ((x * 7 + y * 13 + c * 29) as u8).wrapping_add(offset)
        }),
        index,
    )
}

/// Sequence naming used by the synthetic test captures.
pub fn test_sequence(dir: &Path, start_index: usize, frame_count: usize) -> FrameSequence {
    FrameSequence {
        directory: dir.to_path_buf(),
        start_index,
        frame_count,
        ..Default::default()
    }
}

/// Write `frames` as PNGs named by `sequence`, using each frame's own index.
pub fn write_sequence(sequence: &FrameSequence, frames: &[Frame]) {
    for frame in frames {
        save_rgb(&frame.data, &sequence.path_for(frame.index)).expect("write test frame");
    }
}

/// Config for a small capture in `dir`, writing its output(s) there as well.
pub fn test_config(
    dir: &Path,
    width: usize,
    height: usize,
    frame_count: usize,
    statistic: Statistic,
) -> CalibrationConfig {
    CalibrationConfig {
        width,
        height,
        statistic,
        output: Some(dir.join("out.png")),
        chroma_output: Some(dir.join("chroma.png")),
        sequence: test_sequence(dir, 100, frame_count),
        ..Default::default()
    }
}
