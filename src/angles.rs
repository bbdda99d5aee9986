// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Rotation encoding from 2D keypoint directions.
//!
//! Each non-root joint's per-frame orientation is the four-quadrant angle of
//! the parent→child direction vector, assigned to the Z rotation channel; the
//! X and Y channels stay zero. Only in-plane rotation can be derived because
//! the source detections carry no depth, so this single-axis encoding is
//! intended behavior, not an approximation to be corrected.

use crate::config::ExportConfig;
use crate::keypoints::KeypointSeries;

/// Euler angles `[z, x, y]` in degrees for a direction vector `(dx, dy)`.
///
/// Returns the zero triple if either component is undefined.
#[must_use]
pub fn direction_to_euler(dx: f32, dy: f32) -> [f32; 3] {
    if dx.is_nan() || dy.is_nan() {
        return [0.0, 0.0, 0.0];
    }
    [dy.atan2(dx).to_degrees(), 0.0, 0.0]
}

/// Rotation channels for one joint in one frame.
///
/// The direction runs from the parent's cleaned position to the joint's,
/// scaled into output units with the vertical axis flipped (image space →
/// animation space). If either endpoint is undefined (the keypoint was never
/// detected anywhere in the series) the joint gets the zero triple for this
/// frame.
#[must_use]
pub fn joint_rotation(
    series: &KeypointSeries,
    frame: usize,
    joint: usize,
    parent: usize,
    config: &ExportConfig,
) -> [f32; 3] {
    if !series.is_defined(frame, joint) || !series.is_defined(frame, parent) {
        return [0.0, 0.0, 0.0];
    }

    let [cx, cy] = series.position(frame, joint);
    let [px, py] = series.position(frame, parent);
    let dx = (cx - px) * config.scale;
    let dy = -(cy - py) * config.scale;
    direction_to_euler(dx, dy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn test_cardinal_directions() {
        assert!(approx_eq(direction_to_euler(1.0, 0.0)[0], 0.0, 1e-5));
        assert!(approx_eq(direction_to_euler(0.0, 1.0)[0], 90.0, 1e-4));
        assert!(approx_eq(direction_to_euler(-1.0, 0.0)[0], 180.0, 1e-4));
        assert!(approx_eq(direction_to_euler(0.0, -1.0)[0], -90.0, 1e-4));
    }

    #[test]
    fn test_only_z_channel_is_used() {
        let [_, x, y] = direction_to_euler(3.0, 4.0);
        assert_eq!(x, 0.0);
        assert_eq!(y, 0.0);
    }

    #[test]
    fn test_nan_direction_is_zero_triple() {
        assert_eq!(direction_to_euler(f32::NAN, 1.0), [0.0, 0.0, 0.0]);
        assert_eq!(direction_to_euler(1.0, f32::NAN), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_joint_rotation_flips_vertical_axis() {
        // Child directly below the parent in image space (y grows downward)
        // points down in animation space: -90 degrees.
        let frame = Array2::from_shape_vec(
            (2, 3),
            vec![
                0.0, 0.0, 0.9, // parent
                0.0, 10.0, 0.9, // child, lower in the image
            ],
        )
        .unwrap();
        let series = KeypointSeries::from_frames(&[frame]).unwrap();
        let config = ExportConfig::default();

        let rotation = joint_rotation(&series, 0, 1, 0, &config);
        assert!(approx_eq(rotation[0], -90.0, 1e-4));
    }

    #[test]
    fn test_undefined_endpoint_is_zero_triple() {
        let frame = Array2::from_shape_vec(
            (2, 3),
            vec![f32::NAN, f32::NAN, f32::NAN, 5.0, 5.0, 0.9],
        )
        .unwrap();
        let series = KeypointSeries::from_frames(&[frame]).unwrap();
        let config = ExportConfig::default();

        assert_eq!(joint_rotation(&series, 0, 1, 0, &config), [0.0, 0.0, 0.0]);
        assert_eq!(joint_rotation(&series, 0, 0, 1, &config), [0.0, 0.0, 0.0]);
    }
}
