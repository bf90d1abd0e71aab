pub mod distortion;
pub mod mean;
pub mod stdev;

use crate::consts::{COLOR_CHANNEL_COUNT, PARALLEL_PIXEL_THRESHOLD};
use crate::error::{BacksubError, Result};
use crate::frame::Frame;

/// Running per-pixel statistic over a fixed number of frames.
///
/// Each frame is folded in exactly once. `finalize` is only valid once all
/// expected frames have been accumulated and does not consume the state, so
/// it can be called repeatedly with the same result.
pub trait Accumulator {
    type Output;

    fn expected_frames(&self) -> usize;

    fn accumulated(&self) -> usize;

    fn accumulate(&mut self, frame: &Frame) -> Result<()>;

    fn finalize(&self) -> Result<Self::Output>;

    fn is_complete(&self) -> bool {
        self.accumulated() == self.expected_frames()
    }
}

/// Convert a statistic in 8-bit units to a channel value.
/// Rounds half away from zero and saturates at 0 and 255; NaN becomes 0.
pub fn to_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, u8::MAX as f64) as u8
}

/// Shape and frame-count bookkeeping shared by all accumulators.
#[derive(Clone, Debug)]
pub(crate) struct FrameCounter {
    width: usize,
    height: usize,
    expected: usize,
    accumulated: usize,
}

impl FrameCounter {
    pub(crate) fn new(width: usize, height: usize, expected: usize) -> Self {
        Self {
            width,
            height,
            expected,
            accumulated: 0,
        }
    }

    /// Check `frame` may be folded in and count it.
    pub(crate) fn admit(&mut self, frame: &Frame) -> Result<()> {
        if self.accumulated >= self.expected {
            return Err(BacksubError::TooManyFrames {
                expected: self.expected,
            });
        }
        if frame.width() != self.width || frame.height() != self.height {
            return Err(BacksubError::DimensionMismatch {
                index: frame.index,
                expected_width: self.width,
                expected_height: self.height,
                width: frame.width(),
                height: frame.height(),
            });
        }
        let channels = frame.data.dim().2;
        if channels != COLOR_CHANNEL_COUNT {
            return Err(BacksubError::ChannelMismatch {
                index: frame.index,
                channels,
            });
        }
        self.accumulated += 1;
        Ok(())
    }

    pub(crate) fn require_complete(&self) -> Result<()> {
        if self.accumulated < self.expected {
            return Err(BacksubError::IncompleteAccumulation {
                expected: self.expected,
                accumulated: self.accumulated,
            });
        }
        Ok(())
    }

    pub(crate) fn expected(&self) -> usize {
        self.expected
    }

    pub(crate) fn accumulated(&self) -> usize {
        self.accumulated
    }

    pub(crate) fn is_parallel(&self) -> bool {
        self.width * self.height >= PARALLEL_PIXEL_THRESHOLD
    }
}
