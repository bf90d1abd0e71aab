use ndarray::Array3;

/// A single decoded RGB source frame.
/// Channel values are raw 8-bit intensities.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Pixel data, row-major, shape = (height, width, 3)
    pub data: Array3<u8>,
    /// Position of the frame in its numbered sequence
    pub index: usize,
}

impl Frame {
    pub fn new(data: Array3<u8>, index: usize) -> Self {
        Self { data, index }
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    /// RGB triple at column `x`, row `y`.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        [
            self.data[[y, x, 0]],
            self.data[[y, x, 1]],
            self.data[[y, x, 2]],
        ]
    }
}

/// Which per-pixel statistic a summary image encodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatKind {
    Mean,
    StdDev,
    BrightnessDistortion,
    ChromaticityDistortion,
}

impl std::fmt::Display for StatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mean => write!(f, "Mean"),
            Self::StdDev => write!(f, "Standard Deviation"),
            Self::BrightnessDistortion => write!(f, "Brightness Distortion"),
            Self::ChromaticityDistortion => write!(f, "Chromaticity Distortion"),
        }
    }
}

/// Finalized 8-bit summary image, same shape as the source frames.
#[derive(Clone, Debug, PartialEq)]
pub struct StatImage {
    pub data: Array3<u8>,
    pub kind: StatKind,
}

impl StatImage {
    pub fn new(data: Array3<u8>, kind: StatKind) -> Self {
        Self { data, kind }
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        [
            self.data[[y, x, 0]],
            self.data[[y, x, 1]],
            self.data[[y, x, 2]],
        ]
    }
}
