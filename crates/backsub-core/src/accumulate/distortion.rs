use ndarray::{Array2, Array3, Zip};

use crate::consts::{CHANNEL_MAX, CHROMA_DISPLAY_SCALE, COLOR_CHANNEL_COUNT, STDDEV_FLOOR};
use crate::error::Result;
use crate::frame::{Frame, StatImage, StatKind};

use super::stdev::BackgroundModel;
use super::{to_channel, Accumulator, FrameCounter};

/// Pair of images produced by a distortion pass.
#[derive(Clone, Debug, PartialEq)]
pub struct DistortionImages {
    /// RMS of `alpha - 1`, scaled by 255.
    pub brightness: StatImage,
    /// RMS chromaticity distortion, scaled by `CHROMA_DISPLAY_SCALE * 255`.
    pub chromaticity: StatImage,
}

/// Brightness and chromaticity distortion of one normalized colour against a
/// background mean/stddev.
///
/// Brightness distortion `alpha` is the stddev-weighted least-squares scale of
/// `mean` that best matches `pixel`; chromaticity distortion is the weighted
/// distance between `pixel` and `alpha * mean`.
pub fn brightness_chroma(pixel: [f64; 3], mean: [f64; 3], stddev: [f64; 3]) -> (f64, f64) {
    let mut num = 0.0;
    let mut den = 0.0;
    for c in 0..COLOR_CHANNEL_COUNT {
        let var = stddev[c].max(STDDEV_FLOOR).powi(2);
        num += pixel[c] * mean[c] / var;
        den += mean[c] * mean[c] / var;
    }
    let alpha = if den > 0.0 { num / den } else { 1.0 };

    let mut cd_sq = 0.0;
    for c in 0..COLOR_CHANNEL_COUNT {
        let d = (pixel[c] - alpha * mean[c]) / stddev[c].max(STDDEV_FLOOR);
        cd_sq += d * d;
    }
    (alpha, cd_sq.sqrt())
}

/// Second pass over a sequence: RMS brightness and chromaticity distortion of
/// every frame against a [`BackgroundModel`] built from the same sequence.
#[derive(Clone, Debug)]
pub struct DistortionAccumulator {
    model: BackgroundModel,
    brightness_sq: Array2<f64>,
    chroma_sq: Array2<f64>,
    counter: FrameCounter,
}

impl DistortionAccumulator {
    pub fn new(model: BackgroundModel, frame_count: usize) -> Self {
        let (h, w) = (model.height(), model.width());
        Self {
            model,
            brightness_sq: Array2::zeros((h, w)),
            chroma_sq: Array2::zeros((h, w)),
            counter: FrameCounter::new(w, h, frame_count),
        }
    }

    pub fn model(&self) -> &BackgroundModel {
        &self.model
    }
}

fn normalized(data: &Array3<u8>, y: usize, x: usize) -> [f64; 3] {
    [0, 1, 2].map(|c| f64::from(data[[y, x, c]]) / CHANNEL_MAX)
}

fn triple(data: &Array3<f64>, y: usize, x: usize) -> [f64; 3] {
    [data[[y, x, 0]], data[[y, x, 1]], data[[y, x, 2]]]
}

fn gray_image(values: &Array2<f64>, scale: f64, kind: StatKind) -> StatImage {
    let (h, w) = values.dim();
    let data = Array3::from_shape_fn((h, w, COLOR_CHANNEL_COUNT), |(y, x, _)| {
        to_channel(values[[y, x]] * scale)
    });
    StatImage::new(data, kind)
}

impl Accumulator for DistortionAccumulator {
    type Output = DistortionImages;

    fn expected_frames(&self) -> usize {
        self.counter.expected()
    }

    fn accumulated(&self) -> usize {
        self.counter.accumulated()
    }

    fn accumulate(&mut self, frame: &Frame) -> Result<()> {
        self.counter.admit(frame)?;
        let Self {
            model,
            brightness_sq,
            chroma_sq,
            counter,
        } = self;

        let zip = Zip::indexed(brightness_sq).and(chroma_sq);
        let fold = |(y, x): (usize, usize), a: &mut f64, b: &mut f64| {
            let (alpha, cd) = brightness_chroma(
                normalized(&frame.data, y, x),
                triple(&model.mean, y, x),
                triple(&model.stddev, y, x),
            );
            *a += (alpha - 1.0).powi(2);
            *b += cd * cd;
        };
        if counter.is_parallel() {
            zip.par_for_each(fold);
        } else {
            zip.for_each(fold);
        }
        Ok(())
    }

    fn finalize(&self) -> Result<DistortionImages> {
        self.counter.require_complete()?;
        let n = self.counter.expected() as f64;
        let brightness = self.brightness_sq.mapv(|s| (s / n).sqrt());
        let chroma = self.chroma_sq.mapv(|s| (s / n).sqrt());

        Ok(DistortionImages {
            brightness: gray_image(&brightness, CHANNEL_MAX, StatKind::BrightnessDistortion),
            chromaticity: gray_image(
                &chroma,
                CHROMA_DISPLAY_SCALE * CHANNEL_MAX,
                StatKind::ChromaticityDistortion,
            ),
        })
    }
}
