// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Detection-file discovery and keypoint series loading.
//!
//! Input is a directory of per-frame JSON detection files. Files are matched by
//! a fixed filename suffix and sorted by name; the sorted order is the temporal
//! order of the clip. Subject selection is positional: the first person in each
//! record wins, and frames with no detected people become entirely-missing
//! placeholders for the cleaner to reconstruct.

use std::path::{Path, PathBuf};

use ndarray::Array2;

use crate::detection::DetectionRecord;
use crate::error::{ExportError, Result};
use crate::keypoints::KeypointSeries;

/// Filename suffix that marks a per-frame detection file.
pub const DETECTION_SUFFIX: &str = "_keypoints.json";

/// Collect detection files from a directory in temporal (filename) order.
///
/// # Errors
///
/// Returns an `InputError` if the directory does not exist or contains no
/// detection files; an empty input cannot produce a meaningful output.
pub fn collect_detection_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ExportError::InputError(format!(
            "Not a directory: {}",
            dir.display()
        )));
    }

    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| is_detection_file(path))
        .collect();

    if paths.is_empty() {
        return Err(ExportError::InputError(format!(
            "No *{DETECTION_SUFFIX} files in {}",
            dir.display()
        )));
    }

    paths.sort();
    Ok(paths)
}

/// Check if a path is a detection file based on its filename suffix.
fn is_detection_file(path: &Path) -> bool {
    path.is_file()
        && path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().ends_with(DETECTION_SUFFIX))
}

/// Load one detection file into a `(keypoints, 3)` frame.
///
/// Returns the frame and the number of detected people. Zero people is
/// non-fatal and yields an all-`NAN` frame.
///
/// # Errors
///
/// Returns a `ParseError` if the file is unreadable, is not valid JSON, or the
/// first person's keypoint array has the wrong length. Malformed records are
/// fatal: corruption cannot be distinguished from legitimate absence.
pub fn load_frame(path: &Path, num_keypoints: usize) -> Result<(Array2<f32>, usize)> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        ExportError::ParseError(format!("Failed to read {}: {e}", path.display()))
    })?;
    let record: DetectionRecord = serde_json::from_str(&contents).map_err(|e| {
        ExportError::ParseError(format!("Malformed record {}: {e}", path.display()))
    })?;

    let people = record.people.len();
    match record.people.first() {
        Some(person) => {
            let frame = person.to_frame(num_keypoints).map_err(|e| {
                ExportError::ParseError(format!("{}: {e}", path.display()))
            })?;
            Ok((frame, people))
        }
        None => Ok((KeypointSeries::missing_frame(num_keypoints), 0)),
    }
}

/// Load every detection file in order and assemble the keypoint series.
///
/// # Errors
///
/// Propagates any per-file `ParseError`; returns an `InputError` for an empty
/// path list.
pub fn load_series(paths: &[PathBuf], num_keypoints: usize) -> Result<KeypointSeries> {
    let mut frames = Vec::with_capacity(paths.len());
    for path in paths {
        let (frame, _) = load_frame(path, num_keypoints)?;
        frames.push(frame);
    }
    KeypointSeries::from_frames(&frames)
}
