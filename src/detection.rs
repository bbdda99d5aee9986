// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Per-frame detection record schema.
//!
//! Detection files are JSON records produced by an external pose estimator,
//! one file per video frame. Each record lists zero or more detected subjects,
//! and each subject carries a flat `(x, y, confidence)` array with one triple
//! per keypoint. Unknown fields are ignored.

use ndarray::Array2;
use serde::Deserialize;

use crate::error::{ExportError, Result};

/// One per-frame detection record.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectionRecord {
    /// Detected subjects, possibly empty.
    pub people: Vec<Person>,
}

/// A single detected subject.
#[derive(Debug, Clone, Deserialize)]
pub struct Person {
    /// Flat keypoint array: `(x, y, confidence)` triples in fixed keypoint
    /// index order, length `keypoints * 3`.
    pub pose_keypoints_2d: Vec<f32>,
}

impl Person {
    /// Reshape the flat keypoint array into a `(keypoints, 3)` frame.
    ///
    /// # Arguments
    ///
    /// * `num_keypoints` - Expected keypoint count of the detection format.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the array length does not match
    /// `num_keypoints * 3`; a truncated or padded record cannot be
    /// distinguished from corruption.
    pub fn to_frame(&self, num_keypoints: usize) -> Result<Array2<f32>> {
        let expected = num_keypoints * 3;
        if self.pose_keypoints_2d.len() != expected {
            return Err(ExportError::ParseError(format!(
                "expected {expected} keypoint values, got {}",
                self.pose_keypoints_2d.len()
            )));
        }
        Array2::from_shape_vec((num_keypoints, 3), self.pose_keypoints_2d.clone())
            .map_err(|e| ExportError::ParseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record() {
        let json = r#"{
            "version": 1.3,
            "people": [{"pose_keypoints_2d": [1.0, 2.0, 0.9, 4.0, 5.0, 0.8]}]
        }"#;
        let record: DetectionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.people.len(), 1);

        let frame = record.people[0].to_frame(2).unwrap();
        assert_eq!(frame.shape(), &[2, 3]);
        assert!((frame[[0, 0]] - 1.0).abs() < f32::EPSILON);
        assert!((frame[[1, 2]] - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_empty_people() {
        let json = r#"{"people": []}"#;
        let record: DetectionRecord = serde_json::from_str(json).unwrap();
        assert!(record.people.is_empty());
    }

    #[test]
    fn test_missing_people_is_error() {
        let json = r#"{"version": 1.3}"#;
        assert!(serde_json::from_str::<DetectionRecord>(json).is_err());
    }

    #[test]
    fn test_wrong_length_is_error() {
        let person = Person {
            pose_keypoints_2d: vec![1.0, 2.0, 0.9, 4.0],
        };
        let err = person.to_frame(2).unwrap_err();
        assert!(err.to_string().contains("expected 6"));
    }
}
