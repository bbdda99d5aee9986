// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

#![allow(clippy::multiple_crate_versions)]

//! # Pose to BVH Converter
//!
//! Batch converter from noisy 2D human-pose keypoint detections to BVH
//! (Biovision Hierarchy) motion-capture files, written in Rust. It takes a
//! directory of per-frame `OpenPose`-style JSON detections and produces a
//! skeleton hierarchy plus per-frame motion channels ready for import into
//! animation tools.
//!
//! ## Features
//!
//! - **Missing-data tolerant** - Low-confidence and undetected keypoints are
//!   reconstructed by interpolation and smoothing instead of dropping frames
//! - **Static rest pose** - Bone offsets are derived once from the first
//!   cleaned frame, with neutral fallbacks for unreliable joints
//! - **Exact channel layout** - Hierarchy and motion sections share one
//!   depth-first joint order, so downstream parsers never misassign values
//! - **Single pass** - Offline batch conversion: load, clean, encode, write
//!
//! ## Installation
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! pose2bvh = "0.1.0"
//! ```
//!
//! Or install the CLI tool:
//!
//! ```bash
//! cargo install pose2bvh
//! ```
//!
//! ## Quick Start (Library)
//!
//! ```no_run
//! use std::path::Path;
//! use pose2bvh::{ExportConfig, Skeleton, cleaner, loader, offsets, writer};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExportConfig::new().with_fps(30.0);
//!
//!     // One detection file per video frame, sorted by filename
//!     let files = loader::collect_detection_files(Path::new("openpose_json/video5"))?;
//!     let mut series = loader::load_series(&files, config.num_keypoints)?;
//!
//!     // Fill gaps and smooth jitter in place
//!     cleaner::clean(&mut series, &config);
//!
//!     // Rest pose from the first cleaned frame, then write the BVH
//!     let skeleton = Skeleton::body25();
//!     let offsets = offsets::compute_offsets(&series, &skeleton, &config);
//!     writer::write_bvh(Path::new("output/video5.bvh"), &series, &skeleton, &offsets, &config)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! # Convert a directory of detections with defaults
//! pose2bvh convert --source openpose_json/video5
//!
//! # Custom output path and frame rate
//! pose2bvh convert -s openpose_json/video5 -o output/video5.bvh --fps 24
//!
//! # Stricter confidence filtering, wider smoothing
//! pose2bvh convert -s detections/ --conf 0.2 --smooth-window 9
//! ```
//!
//! **CLI Options:**
//!
//! | Option | Short | Description | Default |
//! |--------|-------|-------------|---------|
//! | `--source` | `-s` | Directory of `*_keypoints.json` files | (required) |
//! | `--output` | `-o` | Output BVH file path | `output/motion.bvh` |
//! | `--fps` | | Output frame rate | `30` |
//! | `--conf` | | Confidence threshold | `0.1` |
//! | `--smooth-window` | | Moving-average window (frames) | `5` |
//! | `--scale` | | Pixel to output-unit scale | `0.01` |
//! | `--z-offset` | | Constant depth offset | `0.05` |
//! | `--keypoints` | | Keypoints per record | `25` |
//! | `--verbose` | | Show verbose output | `true` |
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`loader`] | Detection-file discovery and keypoint series loading |
//! | [`cleaner`] | Confidence filtering, interpolation, smoothing, edge fill |
//! | [`offsets`] | Rest-pose bone-offset computation |
//! | [`angles`] | Per-frame rotation encoding from 2D directions |
//! | [`writer`] | BVH hierarchy and motion serialization |
//! | [`skeleton`] | `BODY_25` joint hierarchy definition |
//! | [`keypoints`] | [`KeypointSeries`] container |
//! | [`detection`] | Per-frame JSON record schema |
//! | [`config`] | [`ExportConfig`] for customizing the pipeline |
//! | [`error`] | Error types ([`ExportError`], [`Result`]) |
//!
//! ## License
//!
//! This project is licensed under [AGPL-3.0](https://ultralytics.com/license).

// Modules
pub mod angles;
pub mod cleaner;
pub mod cli;
pub mod config;
pub mod detection;
pub mod error;
pub mod keypoints;
pub mod loader;
pub mod offsets;
pub mod skeleton;
pub mod writer;

// Re-export main types for convenience
pub use config::ExportConfig;
pub use error::{ExportError, Result};
pub use keypoints::KeypointSeries;
pub use offsets::OffsetTable;
pub use skeleton::Skeleton;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
