// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Keypoint series container.

use ndarray::{Array2, Array3, Axis, s, stack};

use crate::error::{ExportError, Result};

/// Time-ordered keypoint detections for a whole clip.
///
/// Data layout is `(frames, keypoints, 3)` with `(x, y, confidence)` triples.
/// Missing coordinates are `NAN`. Frame index order is temporal and preserved
/// through every pipeline stage; the cleaner fills values in place but never
/// removes frames.
#[derive(Debug, Clone)]
pub struct KeypointSeries {
    /// Raw series data with shape `(frames, keypoints, 3)`.
    pub data: Array3<f32>,
}

impl KeypointSeries {
    /// Assemble a series from per-frame `(keypoints, 3)` arrays in temporal order.
    ///
    /// # Errors
    ///
    /// Returns an `InputError` if `frames` is empty, or a `ParseError` if the
    /// frames disagree on shape.
    pub fn from_frames(frames: &[Array2<f32>]) -> Result<Self> {
        if frames.is_empty() {
            return Err(ExportError::InputError(
                "no frames to assemble into a series".to_string(),
            ));
        }
        let views: Vec<_> = frames.iter().map(Array2::view).collect();
        let data = stack(Axis(0), &views)
            .map_err(|e| ExportError::ParseError(format!("inconsistent frame shapes: {e}")))?;
        Ok(Self { data })
    }

    /// An entirely-missing frame: every coordinate `NAN`.
    #[must_use]
    pub fn missing_frame(num_keypoints: usize) -> Array2<f32> {
        Array2::from_elem((num_keypoints, 3), f32::NAN)
    }

    /// Number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.shape()[0]
    }

    /// Check if the series has no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of keypoints per frame.
    #[must_use]
    pub fn num_keypoints(&self) -> usize {
        self.data.shape()[1]
    }

    /// X coordinate of `keypoint` in `frame`.
    #[must_use]
    pub fn x(&self, frame: usize, keypoint: usize) -> f32 {
        self.data[[frame, keypoint, 0]]
    }

    /// Y coordinate of `keypoint` in `frame`.
    #[must_use]
    pub fn y(&self, frame: usize, keypoint: usize) -> f32 {
        self.data[[frame, keypoint, 1]]
    }

    /// Detection confidence of `keypoint` in `frame`.
    #[must_use]
    pub fn conf(&self, frame: usize, keypoint: usize) -> f32 {
        self.data[[frame, keypoint, 2]]
    }

    /// `[x, y]` position of `keypoint` in `frame`. Components may be `NAN`.
    #[must_use]
    pub fn position(&self, frame: usize, keypoint: usize) -> [f32; 2] {
        [self.x(frame, keypoint), self.y(frame, keypoint)]
    }

    /// Whether `keypoint` has defined x and y in `frame`.
    #[must_use]
    pub fn is_defined(&self, frame: usize, keypoint: usize) -> bool {
        !self.x(frame, keypoint).is_nan() && !self.y(frame, keypoint).is_nan()
    }

    /// The full time series of one keypoint's `axis` component (0 = x, 1 = y,
    /// 2 = confidence).
    #[must_use]
    pub fn column(&self, keypoint: usize, axis: usize) -> Vec<f32> {
        self.data.slice(s![.., keypoint, axis]).to_vec()
    }

    /// Overwrite one keypoint's `axis` component across all frames.
    ///
    /// # Panics
    ///
    /// Panics if `values` is longer than the series.
    pub fn set_column(&mut self, keypoint: usize, axis: usize, values: &[f32]) {
        for (frame, &value) in values.iter().enumerate() {
            self.data[[frame, keypoint, axis]] = value;
        }
    }
}
