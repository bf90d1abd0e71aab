use ndarray::{Array3, Zip};
use serde::{Deserialize, Serialize};

use crate::consts::{CHANNEL_MAX, COLOR_CHANNEL_COUNT};
use crate::error::{BacksubError, Result};
use crate::frame::{Frame, StatImage, StatKind};

use super::{to_channel, Accumulator, FrameCounter};

/// What to do when `E[x^2] - E[x]^2` comes out negative through
/// floating-point cancellation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariancePolicy {
    /// Treat negative variance as zero.
    #[default]
    Clamp,
    /// Fail with `BacksubError::Arithmetic`.
    Strict,
}

impl std::fmt::Display for VariancePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clamp => write!(f, "Clamp"),
            Self::Strict => write!(f, "Strict"),
        }
    }
}

/// Per-pixel background model: normalized mean and population standard
/// deviation, both shape (height, width, 3) with values in [0, 1].
#[derive(Clone, Debug)]
pub struct BackgroundModel {
    pub mean: Array3<f64>,
    pub stddev: Array3<f64>,
}

impl BackgroundModel {
    pub fn width(&self) -> usize {
        self.mean.dim().1
    }

    pub fn height(&self) -> usize {
        self.mean.dim().0
    }
}

/// Per-pixel per-channel population standard deviation over exactly
/// `frame_count` frames.
#[derive(Clone, Debug)]
pub struct StdDevAccumulator {
    sum: Array3<f64>,
    sum_sq: Array3<f64>,
    policy: VariancePolicy,
    counter: FrameCounter,
}

impl StdDevAccumulator {
    pub fn new(width: usize, height: usize, frame_count: usize) -> Self {
        Self::with_policy(width, height, frame_count, VariancePolicy::default())
    }

    pub fn with_policy(
        width: usize,
        height: usize,
        frame_count: usize,
        policy: VariancePolicy,
    ) -> Self {
        let shape = (height, width, COLOR_CHANNEL_COUNT);
        Self {
            sum: Array3::zeros(shape),
            sum_sq: Array3::zeros(shape),
            policy,
            counter: FrameCounter::new(width, height, frame_count),
        }
    }

    pub fn policy(&self) -> VariancePolicy {
        self.policy
    }

    /// Mean and standard deviation of every pixel/channel.
    pub fn statistics(&self) -> Result<BackgroundModel> {
        self.counter.require_complete()?;
        let n = self.counter.expected() as f64;

        let mean = &self.sum / n;
        let mut stddev = Array3::<f64>::zeros(self.sum.dim());
        for ((y, x, channel), &sq) in self.sum_sq.indexed_iter() {
            let m = mean[[y, x, channel]];
            let variance = sq / n - m * m;
            stddev[[y, x, channel]] = checked_sqrt(variance, self.policy, x, y, channel)?;
        }

        Ok(BackgroundModel { mean, stddev })
    }
}

/// Square root of a variance, applying `policy` when it is negative.
fn checked_sqrt(
    variance: f64,
    policy: VariancePolicy,
    x: usize,
    y: usize,
    channel: usize,
) -> Result<f64> {
    if variance >= 0.0 {
        return Ok(variance.sqrt());
    }
    match policy {
        VariancePolicy::Clamp => Ok(0.0),
        VariancePolicy::Strict => Err(BacksubError::Arithmetic {
            x,
            y,
            channel,
            variance,
        }),
    }
}

impl Accumulator for StdDevAccumulator {
    type Output = StatImage;

    fn expected_frames(&self) -> usize {
        self.counter.expected()
    }

    fn accumulated(&self) -> usize {
        self.counter.accumulated()
    }

    fn accumulate(&mut self, frame: &Frame) -> Result<()> {
        self.counter.admit(frame)?;
        let zip = Zip::from(&mut self.sum)
            .and(&mut self.sum_sq)
            .and(&frame.data);
        let fold = |s: &mut f64, sq: &mut f64, &v: &u8| {
            let x = f64::from(v) / CHANNEL_MAX;
            *s += x;
            *sq += x * x;
        };
        if self.counter.is_parallel() {
            zip.par_for_each(fold);
        } else {
            zip.for_each(fold);
        }
        Ok(())
    }

    fn finalize(&self) -> Result<StatImage> {
        let model = self.statistics()?;
        let data = model.stddev.mapv(|s| to_channel(s * CHANNEL_MAX));
        Ok(StatImage::new(data, StatKind::StdDev))
    }
}
