use ndarray::{Array3, Zip};

use crate::consts::COLOR_CHANNEL_COUNT;
use crate::error::Result;
use crate::frame::{Frame, StatImage, StatKind};

use super::{to_channel, Accumulator, FrameCounter};

/// Per-pixel per-channel arithmetic mean over exactly `frame_count` frames.
///
/// Raw intensities are summed and divided once in `finalize`, so rounding
/// error does not grow with the number of frames.
#[derive(Clone, Debug)]
pub struct MeanAccumulator {
    sum: Array3<f64>,
    counter: FrameCounter,
}

impl MeanAccumulator {
    pub fn new(width: usize, height: usize, frame_count: usize) -> Self {
        Self {
            sum: Array3::zeros((height, width, COLOR_CHANNEL_COUNT)),
            counter: FrameCounter::new(width, height, frame_count),
        }
    }

    /// Mean intensities in raw 8-bit units, shape (height, width, 3).
    pub fn means(&self) -> Result<Array3<f64>> {
        self.counter.require_complete()?;
        Ok(&self.sum / self.counter.expected() as f64)
    }
}

impl Accumulator for MeanAccumulator {
    type Output = StatImage;

    fn expected_frames(&self) -> usize {
        self.counter.expected()
    }

    fn accumulated(&self) -> usize {
        self.counter.accumulated()
    }

    fn accumulate(&mut self, frame: &Frame) -> Result<()> {
        self.counter.admit(frame)?;
        let zip = Zip::from(&mut self.sum).and(&frame.data);
        if self.counter.is_parallel() {
            zip.par_for_each(|s, &v| *s += f64::from(v));
        } else {
            zip.for_each(|s, &v| *s += f64::from(v));
        }
        Ok(())
    }

    fn finalize(&self) -> Result<StatImage> {
        let means = self.means()?;
        Ok(StatImage::new(means.mapv(to_channel), StatKind::Mean))
    }
}
