/// Minimum pixel count (h*w) at which accumulators switch to element-wise
/// parallel `Zip::par_for_each`.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Number of channels in a frame (R, G, B).
pub const COLOR_CHANNEL_COUNT: usize = 3;

/// Largest 8-bit channel value. Intensities are normalized by this before
/// second-moment statistics are taken.
pub const CHANNEL_MAX: f64 = 255.0;

/// Smallest standard deviation used as a divisor in distortion statistics.
pub const STDDEV_FLOOR: f64 = 1e-6;

/// Chromaticity distortion is divided by 10 before encoding so typical
/// values land inside the 8-bit range.
pub const CHROMA_DISPLAY_SCALE: f64 = 0.1;

/// Capture resolution of the calibration camera.
pub const DEFAULT_WIDTH: usize = 640;
pub const DEFAULT_HEIGHT: usize = 480;

/// Default capture naming: `output0100.png` .. `output0159.png`.
pub const DEFAULT_FILENAME_PREFIX: &str = "output0";
pub const DEFAULT_FILENAME_EXTENSION: &str = ".png";
pub const DEFAULT_START_INDEX: usize = 100;
pub const DEFAULT_INDEX_DIGITS: usize = 3;
pub const DEFAULT_FRAME_COUNT: usize = 60;

/// Widest index padding accepted; `usize::MAX` has 20 decimal digits.
pub const MAX_INDEX_DIGITS: usize = 20;

pub const DEFAULT_MEAN_OUTPUT: &str = "average.png";
pub const DEFAULT_STDDEV_OUTPUT: &str = "stdev.png";
pub const DEFAULT_BRIGHTNESS_OUTPUT: &str = "brightness.png";
pub const DEFAULT_CHROMA_OUTPUT: &str = "chromaticity.png";
