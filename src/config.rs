// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Export configuration.
//!
//! This module defines the [`ExportConfig`] struct, which controls every parameter
//! of the conversion pipeline: keypoint layout, confidence filtering, smoothing,
//! spatial scaling, and output frame rate. All values are fixed at invocation.

/// Configuration for keypoint-to-BVH conversion.
///
/// This struct is used to customize the behavior of the export pipeline.
/// It uses a builder pattern for convenient construction.
///
/// # Example
///
/// ```rust
/// use pose2bvh::ExportConfig;
///
/// let config = ExportConfig::new()
///     .with_fps(24.0)
///     .with_confidence(0.2)
///     .with_smooth_window(9);
/// ```
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Output frame rate in frames per second.
    /// Determines the `Frame Time` declared in the motion section.
    pub fps: f32,
    /// Number of keypoints per detection record.
    /// Each record's flat array must contain exactly `num_keypoints * 3` values.
    pub num_keypoints: usize,
    /// Confidence threshold (0.0 to 1.0).
    /// Keypoints detected below this confidence are discarded and reconstructed
    /// by interpolation from neighboring frames.
    pub confidence_threshold: f32,
    /// Window size (in frames) of the centered moving average applied after
    /// interpolation. A window of 1 or less disables smoothing.
    pub smooth_window: usize,
    /// Spatial scale factor from detection pixels to output units.
    pub scale: f32,
    /// Constant depth component assigned to every bone offset and to the root
    /// translation. The pipeline works in a single 2D plane.
    pub z_offset: f32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            fps: 30.0,
            num_keypoints: 25,
            confidence_threshold: 0.1,
            smooth_window: 5,
            scale: 0.01,
            z_offset: 0.05,
        }
    }
}

impl ExportConfig {
    /// Create a new configuration with default values.
    ///
    /// # Returns
    ///
    /// * A new `ExportConfig` instance with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output frame rate.
    ///
    /// # Arguments
    ///
    /// * `fps` - Frames per second of the source video.
    ///
    /// # Returns
    ///
    /// * The modified `ExportConfig`.
    #[must_use]
    pub const fn with_fps(mut self, fps: f32) -> Self {
        self.fps = fps;
        self
    }

    /// Set the number of keypoints per detection record.
    ///
    /// # Arguments
    ///
    /// * `count` - Keypoint count of the detector's output format.
    ///
    /// # Returns
    ///
    /// * The modified `ExportConfig`.
    #[must_use]
    pub const fn with_num_keypoints(mut self, count: usize) -> Self {
        self.num_keypoints = count;
        self
    }

    /// Set the confidence threshold.
    ///
    /// Keypoints with a detection confidence below this threshold are treated
    /// as missing, regardless of how plausible their coordinates look.
    ///
    /// # Arguments
    ///
    /// * `threshold` - The minimum confidence score (0.0 to 1.0).
    ///
    /// # Returns
    ///
    /// * The modified `ExportConfig`.
    #[must_use]
    pub const fn with_confidence(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    /// Set the smoothing window size.
    ///
    /// # Arguments
    ///
    /// * `window` - Centered moving-average window in frames.
    ///
    /// # Returns
    ///
    /// * The modified `ExportConfig`.
    #[must_use]
    pub const fn with_smooth_window(mut self, window: usize) -> Self {
        self.smooth_window = window;
        self
    }

    /// Set the spatial scale factor.
    ///
    /// # Arguments
    ///
    /// * `scale` - Multiplier from detection pixels to output units.
    ///
    /// # Returns
    ///
    /// * The modified `ExportConfig`.
    #[must_use]
    pub const fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the constant depth offset.
    ///
    /// # Arguments
    ///
    /// * `z_offset` - Depth component of bone offsets and root translation.
    ///
    /// # Returns
    ///
    /// * The modified `ExportConfig`.
    #[must_use]
    pub const fn with_z_offset(mut self, z_offset: f32) -> Self {
        self.z_offset = z_offset;
        self
    }

    /// Frame time (seconds per frame) declared in the motion section.
    #[must_use]
    pub fn frame_time(&self) -> f32 {
        1.0 / self.fps
    }
}
