use std::ops::Range;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{
    DEFAULT_FILENAME_EXTENSION, DEFAULT_FILENAME_PREFIX, DEFAULT_FRAME_COUNT,
    DEFAULT_INDEX_DIGITS, DEFAULT_START_INDEX,
};
use crate::error::{BacksubError, Result};
use crate::frame::Frame;
use crate::io::image_io::decode_rgb;

/// Naming scheme of a numbered capture sequence:
/// `<directory>/<prefix><index><extension>`, index zero-padded to `index_digits`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameSequence {
    pub directory: PathBuf,
    pub prefix: String,
    pub extension: String,
    pub start_index: usize,
    pub frame_count: usize,
    pub index_digits: usize,
}

impl Default for FrameSequence {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            prefix: DEFAULT_FILENAME_PREFIX.to_string(),
            extension: DEFAULT_FILENAME_EXTENSION.to_string(),
            start_index: DEFAULT_START_INDEX,
            frame_count: DEFAULT_FRAME_COUNT,
            index_digits: DEFAULT_INDEX_DIGITS,
        }
    }
}

impl FrameSequence {
    pub fn file_name(&self, index: usize) -> String {
        format!(
            "{}{:0width$}{}",
            self.prefix,
            index,
            self.extension,
            width = self.index_digits
        )
    }

    pub fn path_for(&self, index: usize) -> PathBuf {
        self.directory.join(self.file_name(index))
    }

    /// Sequence indices in load order.
    pub fn indices(&self) -> Range<usize> {
        self.start_index..self.start_index.saturating_add(self.frame_count)
    }

    /// Index of the last frame, or `None` for an empty or overflowing range.
    pub fn last_index(&self) -> Option<usize> {
        self.frame_count
            .checked_sub(1)
            .and_then(|offset| self.start_index.checked_add(offset))
    }
}

/// Loads frames of a [`FrameSequence`], checking each against the expected
/// dimensions.
#[derive(Clone, Debug)]
pub struct FrameLoader {
    sequence: FrameSequence,
    width: usize,
    height: usize,
}

impl FrameLoader {
    pub fn new(sequence: FrameSequence, width: usize, height: usize) -> Self {
        Self {
            sequence,
            width,
            height,
        }
    }

    pub fn sequence(&self) -> &FrameSequence {
        &self.sequence
    }

    pub fn frame_count(&self) -> usize {
        self.sequence.frame_count
    }

    pub fn path_for(&self, index: usize) -> PathBuf {
        self.sequence.path_for(index)
    }

    pub fn indices(&self) -> Range<usize> {
        self.sequence.indices()
    }

    /// Read and decode the frame with sequence number `index`.
    pub fn load(&self, index: usize) -> Result<Frame> {
        let path = self.path_for(index);
        debug!(index, path = %path.display(), "Loading frame");
        let data = decode_rgb(&path).map_err(|source| BacksubError::FrameLoad {
            index,
            path: path.clone(),
            source,
        })?;

        let (h, w, _) = data.dim();
        if w != self.width || h != self.height {
            return Err(BacksubError::DimensionMismatch {
                index,
                expected_width: self.width,
                expected_height: self.height,
                width: w,
                height: h,
            });
        }

        Ok(Frame::new(data, index))
    }

    /// Frames in sequence order, decoded lazily one at a time.
    pub fn frames(&self) -> impl Iterator<Item = Result<Frame>> + '_ {
        self.indices().map(move |i| self.load(i))
    }

    /// Indices whose file is not present on disk.
    pub fn missing_indices(&self) -> Vec<usize> {
        self.indices()
            .filter(|&i| !self.path_for(i).is_file())
            .collect()
    }
}
