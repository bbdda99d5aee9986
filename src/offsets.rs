// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Rest-pose offset computation.
//!
//! Bone offsets are derived once, from the first cleaned frame only, and are
//! immutable afterwards. Bone lengths are therefore frozen from frame 0; the
//! cleaner's smoothing is relied upon to keep that frame representative.

use std::collections::HashMap;

use crate::config::ExportConfig;
use crate::keypoints::KeypointSeries;
use crate::skeleton::Skeleton;

/// Parent-relative rest offsets keyed by joint index.
pub type OffsetTable = HashMap<usize, [f32; 3]>;

/// Compute the static rest-pose offset table from cleaned frame 0.
///
/// The root always gets `[0, 0, z_offset]`. A joint whose own or parent
/// position is undefined in frame 0 falls back to the same neutral offset,
/// keeping the hierarchy well-formed when rest-pose data is unreliable.
/// Vertical deltas are negated to convert image space to animation space.
#[must_use]
pub fn compute_offsets(
    series: &KeypointSeries,
    skeleton: &Skeleton,
    config: &ExportConfig,
) -> OffsetTable {
    let neutral = [0.0, 0.0, config.z_offset];
    let mut offsets = OffsetTable::new();

    for joint in skeleton.joints() {
        let offset = match skeleton.parent(joint) {
            Some(parent) if series.is_defined(0, joint) && series.is_defined(0, parent) => {
                let [cx, cy] = series.position(0, joint);
                let [px, py] = series.position(0, parent);
                [
                    (cx - px) * config.scale,
                    -(cy - py) * config.scale,
                    config.z_offset,
                ]
            }
            _ => neutral,
        };
        offsets.insert(joint, offset);
    }

    offsets
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    /// Series whose frame 0 places keypoint `k` at `(10k, 5k)` with high
    /// confidence, for all 25 `BODY_25` keypoints.
    fn grid_series(frames: usize) -> KeypointSeries {
        let arrays: Vec<Array2<f32>> = (0..frames)
            .map(|_| {
                let values: Vec<f32> = (0..25)
                    .flat_map(|k| {
                        #[allow(clippy::cast_precision_loss)]
                        let k = k as f32;
                        [10.0 * k, 5.0 * k, 0.9]
                    })
                    .collect();
                Array2::from_shape_vec((25, 3), values).unwrap()
            })
            .collect();
        KeypointSeries::from_frames(&arrays).unwrap()
    }

    #[test]
    fn test_root_offset_is_neutral() {
        let series = grid_series(2);
        let skeleton = Skeleton::body25();
        let config = ExportConfig::default();
        let offsets = compute_offsets(&series, &skeleton, &config);

        assert_eq!(offsets[&8], [0.0, 0.0, 0.05]);
    }

    #[test]
    fn test_child_offset_from_frame_zero() {
        let series = grid_series(2);
        let skeleton = Skeleton::body25();
        let config = ExportConfig::default();
        let offsets = compute_offsets(&series, &skeleton, &config);

        // Neck (1) relative to MidHip (8): dx = -70, dy = -35, scaled by 0.01
        // with the vertical axis flipped.
        let neck = offsets[&1];
        assert!((neck[0] - -0.7).abs() < 1e-5);
        assert!((neck[1] - 0.35).abs() < 1e-5);
        assert!((neck[2] - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_undefined_joint_falls_back_to_neutral() {
        let mut series = grid_series(1);
        let skeleton = Skeleton::body25();
        let config = ExportConfig::default();

        // Wipe both the wrist (4) and its parent elbow (3).
        for keypoint in [3, 4] {
            for axis in 0..3 {
                series.data[[0, keypoint, axis]] = f32::NAN;
            }
        }
        let offsets = compute_offsets(&series, &skeleton, &config);

        assert_eq!(offsets[&4], [0.0, 0.0, 0.05]);
        // The elbow itself is also degenerate: its own position is undefined.
        assert_eq!(offsets[&3], [0.0, 0.0, 0.05]);
        // A fully-defined pair is unaffected.
        assert!(offsets[&1][0].abs() > 1e-6);
    }

    #[test]
    fn test_offsets_depend_on_frame_zero_only() {
        let mut series = grid_series(3);
        let skeleton = Skeleton::body25();
        let config = ExportConfig::default();
        let before = compute_offsets(&series, &skeleton, &config);

        // Mutating later frames must not move the rest pose.
        for keypoint in 0..25 {
            series.data[[1, keypoint, 0]] = 1234.0;
            series.data[[2, keypoint, 1]] = -999.0;
        }
        let after = compute_offsets(&series, &skeleton, &config);

        assert_eq!(before, after);
    }

    #[test]
    fn test_every_joint_has_an_offset() {
        let series = grid_series(1);
        let skeleton = Skeleton::body25();
        let offsets = compute_offsets(&series, &skeleton, &ExportConfig::default());
        assert_eq!(offsets.len(), skeleton.len());
    }
}
