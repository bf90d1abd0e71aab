use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BacksubError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Failed to load frame {index} ({}): {source}", path.display())]
    FrameLoad {
        index: usize,
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(
        "Frame {index} is {width}x{height}, expected {expected_width}x{expected_height}"
    )]
    DimensionMismatch {
        index: usize,
        expected_width: usize,
        expected_height: usize,
        width: usize,
        height: usize,
    },

    #[error("Frame {index} has {channels} channels, expected 3")]
    ChannelMismatch { index: usize, channels: usize },

    #[error("Negative variance {variance:e} at pixel ({x}, {y}) channel {channel}")]
    Arithmetic {
        x: usize,
        y: usize,
        channel: usize,
        variance: f64,
    },

    #[error("Only {accumulated} of {expected} frames accumulated")]
    IncompleteAccumulation { expected: usize, accumulated: usize },

    #[error("Accumulator already holds all {expected} frames")]
    TooManyFrames { expected: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, BacksubError>;
