// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! BVH serialization.
//!
//! Writes the two sections of a BVH document: the one-time skeleton hierarchy
//! (nested joint blocks with offsets and channel declarations) and the
//! per-frame motion lines. Both sections visit joints in the same depth-first
//! order, so the channel layout declared by the hierarchy matches the value
//! order of every motion line exactly; consuming tools misinterpret the file
//! otherwise. Motion values are derived per frame and written immediately,
//! never retained.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::angles;
use crate::config::ExportConfig;
use crate::error::{ExportError, Result};
use crate::keypoints::KeypointSeries;
use crate::offsets::OffsetTable;
use crate::skeleton::Skeleton;

/// Write a complete BVH file for a cleaned keypoint series.
///
/// The output's parent directory is created if absent; this is the only
/// auto-remediated error condition in the pipeline.
///
/// # Errors
///
/// Returns a `WriteError` if the output file cannot be created, or an `Io`
/// error if writing fails.
pub fn write_bvh(
    path: &Path,
    series: &KeypointSeries,
    skeleton: &Skeleton,
    offsets: &OffsetTable,
    config: &ExportConfig,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ExportError::WriteError(format!(
                    "Failed to create directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
    }

    let file = File::create(path).map_err(|e| {
        ExportError::WriteError(format!("Failed to create {}: {e}", path.display()))
    })?;
    let mut out = BufWriter::new(file);
    write_document(&mut out, series, skeleton, offsets, config)?;
    out.flush()?;
    Ok(())
}

/// Write both BVH sections to any writer.
///
/// # Errors
///
/// Returns a `WriteError` if a joint is missing from the offset table, or an
/// `Io` error if writing fails.
pub fn write_document(
    out: &mut impl Write,
    series: &KeypointSeries,
    skeleton: &Skeleton,
    offsets: &OffsetTable,
    config: &ExportConfig,
) -> Result<()> {
    write_hierarchy(out, skeleton, offsets)?;
    write_motion(out, series, skeleton, config)?;
    Ok(())
}

fn joint_offset(offsets: &OffsetTable, joint: usize) -> Result<[f32; 3]> {
    offsets.get(&joint).copied().ok_or_else(|| {
        ExportError::WriteError(format!("no offset computed for joint {joint}"))
    })
}

/// Emit the hierarchy section: `ROOT` block plus recursively nested `JOINT`
/// blocks, children in skeleton declaration order, two-space indentation.
fn write_hierarchy(out: &mut impl Write, skeleton: &Skeleton, offsets: &OffsetTable) -> Result<()> {
    let root = skeleton.root();
    let offset = joint_offset(offsets, root)?;

    writeln!(out, "HIERARCHY")?;
    writeln!(out, "ROOT {}", skeleton.joint_name(root))?;
    writeln!(out, "{{")?;
    writeln!(
        out,
        "  OFFSET {:.5} {:.5} {:.5}",
        offset[0], offset[1], offset[2]
    )?;
    writeln!(
        out,
        "  CHANNELS 6 Xposition Yposition Zposition Zrotation Xrotation Yrotation"
    )?;
    write_joint(out, skeleton, offsets, root, "  ")?;
    writeln!(out, "}}")?;
    Ok(())
}

fn write_joint(
    out: &mut impl Write,
    skeleton: &Skeleton,
    offsets: &OffsetTable,
    joint: usize,
    indent: &str,
) -> Result<()> {
    for child in skeleton.children(joint) {
        let offset = joint_offset(offsets, child)?;
        writeln!(out, "{indent}JOINT {}", skeleton.joint_name(child))?;
        writeln!(out, "{indent}{{")?;
        writeln!(
            out,
            "{indent}  OFFSET {:.5} {:.5} {:.5}",
            offset[0], offset[1], offset[2]
        )?;
        writeln!(out, "{indent}  CHANNELS 3 Zrotation Xrotation Yrotation")?;
        write_joint(out, skeleton, offsets, child, &format!("{indent}  "))?;
        writeln!(out, "{indent}}}")?;
    }
    Ok(())
}

/// Emit the motion section: frame count, frame time, then one line per frame
/// in strict temporal order.
fn write_motion(
    out: &mut impl Write,
    series: &KeypointSeries,
    skeleton: &Skeleton,
    config: &ExportConfig,
) -> Result<()> {
    writeln!(out, "MOTION")?;
    writeln!(out, "Frames: {}", series.len())?;
    writeln!(out, "Frame Time: {:.6}", config.frame_time())?;

    let root = skeleton.root();
    let order = skeleton.traversal();

    for frame in 0..series.len() {
        let translation = root_translation(series, frame, root, config);
        let mut line = format!(
            "{:.5} {:.5} {:.5} 0 0 0",
            translation[0], translation[1], translation[2]
        );

        for &joint in order.iter().filter(|&&joint| joint != root) {
            if let Some(parent) = skeleton.parent(joint) {
                let rotation = angles::joint_rotation(series, frame, joint, parent, config);
                line.push_str(&format!(
                    " {:.2} {:.2} {:.2}",
                    rotation[0], rotation[1], rotation[2]
                ));
            }
        }

        writeln!(out, "{line}")?;
    }

    Ok(())
}

/// Root translation for one frame: scaled position with the vertical axis
/// flipped and the constant depth offset. Undefined components degrade to 0.
fn root_translation(
    series: &KeypointSeries,
    frame: usize,
    root: usize,
    config: &ExportConfig,
) -> [f32; 3] {
    let [x, y] = series.position(frame, root);
    [
        if x.is_nan() { 0.0 } else { x * config.scale },
        if y.is_nan() { 0.0 } else { -y * config.scale },
        config.z_offset,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offsets::compute_offsets;
    use ndarray::Array2;

    /// Cleaned-looking series with every `BODY_25` keypoint defined.
    fn synthetic_series(frames: usize) -> KeypointSeries {
        let arrays: Vec<Array2<f32>> = (0..frames)
            .map(|frame| {
                let values: Vec<f32> = (0..25)
                    .flat_map(|k| {
                        #[allow(clippy::cast_precision_loss)]
                        let k = k as f32;
                        #[allow(clippy::cast_precision_loss)]
                        let f = frame as f32;
                        [100.0 + 10.0 * k + f, 200.0 + 5.0 * k, 0.9]
                    })
                    .collect();
                Array2::from_shape_vec((25, 3), values).unwrap()
            })
            .collect();
        KeypointSeries::from_frames(&arrays).unwrap()
    }

    fn render(series: &KeypointSeries, config: &ExportConfig) -> String {
        let skeleton = Skeleton::body25();
        let offsets = compute_offsets(series, &skeleton, config);
        let mut out = Vec::new();
        write_document(&mut out, series, &skeleton, &offsets, config).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_document_layout() {
        let series = synthetic_series(2);
        let config = ExportConfig::default();
        let text = render(&series, &config);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "HIERARCHY");
        assert_eq!(lines[1], "ROOT Hips");
        assert_eq!(lines[2], "{");
        assert_eq!(lines[3], "  OFFSET 0.00000 0.00000 0.05000");
        assert_eq!(
            lines[4],
            "  CHANNELS 6 Xposition Yposition Zposition Zrotation Xrotation Yrotation"
        );
        assert!(text.contains("MOTION\nFrames: 2\nFrame Time: 0.033333\n"));
    }

    #[test]
    fn test_hierarchy_declares_every_joint_once() {
        let series = synthetic_series(1);
        let text = render(&series, &ExportConfig::default());

        assert_eq!(text.matches("ROOT ").count(), 1);
        assert_eq!(text.matches("JOINT ").count(), 14);
        assert_eq!(text.matches("CHANNELS 3 ").count(), 14);
    }

    #[test]
    fn test_hierarchy_joint_order_matches_traversal() {
        let series = synthetic_series(1);
        let text = render(&series, &ExportConfig::default());
        let skeleton = Skeleton::body25();

        let declared: Vec<String> = text
            .lines()
            .filter_map(|line| {
                let trimmed = line.trim_start();
                trimmed
                    .strip_prefix("ROOT ")
                    .or_else(|| trimmed.strip_prefix("JOINT "))
                    .map(str::to_string)
            })
            .collect();
        let expected: Vec<String> = skeleton
            .traversal()
            .into_iter()
            .map(|joint| skeleton.joint_name(joint))
            .collect();
        assert_eq!(declared, expected);
    }

    #[test]
    fn test_motion_line_value_count_matches_channels() {
        let series = synthetic_series(3);
        let text = render(&series, &ExportConfig::default());
        let skeleton = Skeleton::body25();

        let motion_lines: Vec<&str> = text
            .lines()
            .skip_while(|line| !line.starts_with("Frame Time:"))
            .skip(1)
            .collect();
        assert_eq!(motion_lines.len(), 3);
        for line in motion_lines {
            assert_eq!(line.split_whitespace().count(), skeleton.channel_count());
        }
    }

    #[test]
    fn test_root_rotation_is_fixed_zero() {
        let series = synthetic_series(1);
        let text = render(&series, &ExportConfig::default());

        let motion_line = text.lines().last().unwrap();
        let values: Vec<&str> = motion_line.split_whitespace().collect();
        assert_eq!(&values[3..6], &["0", "0", "0"]);
    }

    #[test]
    fn test_undefined_root_translation_degrades_to_zero() {
        let mut series = synthetic_series(1);
        for axis in 0..3 {
            series.data[[0, 8, axis]] = f32::NAN;
        }
        let config = ExportConfig::default();
        let translation = root_translation(&series, 0, 8, &config);
        assert_eq!(translation, [0.0, 0.0, 0.05]);
    }

    #[test]
    fn test_write_bvh_creates_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/motion.bvh");
        let series = synthetic_series(2);
        let skeleton = Skeleton::body25();
        let config = ExportConfig::default();
        let offsets = compute_offsets(&series, &skeleton, &config);

        write_bvh(&path, &series, &skeleton, &offsets, &config).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("HIERARCHY"));
        assert!(text.contains("Frames: 2"));
    }
}
