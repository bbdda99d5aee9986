// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::path::Path;
use std::process;
use std::time::Instant;

use crate::cli::args::ConvertArgs;
use crate::config::ExportConfig;
use crate::keypoints::KeypointSeries;
use crate::skeleton::Skeleton;
use crate::{VERSION, cleaner, loader, offsets, writer};
use crate::{error, success, verbose, warn};

/// Run keypoint-to-BVH conversion.
#[allow(clippy::cast_precision_loss)]
pub fn run_conversion(args: &ConvertArgs) {
    crate::cli::logging::set_verbose(args.verbose);

    let config = ExportConfig::new()
        .with_fps(args.fps)
        .with_num_keypoints(args.keypoints)
        .with_confidence(args.conf)
        .with_smooth_window(args.smooth_window)
        .with_scale(args.scale)
        .with_z_offset(args.z_offset);

    let source = Path::new(&args.source);
    let output = Path::new(&args.output);

    let skeleton = Skeleton::body25();
    if config.num_keypoints <= skeleton.max_index() {
        error!(
            "--keypoints {} is too small; the skeleton references keypoint index {}",
            config.num_keypoints,
            skeleton.max_index()
        );
        process::exit(1);
    }

    println!("pose2bvh {VERSION} 🚀 keypoints → BVH");

    let files = match loader::collect_detection_files(source) {
        Ok(files) => files,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    let load_start = Instant::now();
    let mut frames = Vec::with_capacity(files.len());
    let mut empty_frames = 0usize;
    for (i, path) in files.iter().enumerate() {
        let (frame, people) = match loader::load_frame(path, config.num_keypoints) {
            Ok(loaded) => loaded,
            Err(e) => {
                error!("{e}");
                process::exit(1);
            }
        };
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        let summary = match people {
            0 => "(no people)".to_string(),
            1 => "1 person".to_string(),
            n => format!("{n} people"),
        };
        verbose!("frame {}/{} {}: {}", i + 1, files.len(), name, summary);
        if people == 0 {
            empty_frames += 1;
        }
        frames.push(frame);
    }
    let mut series = match KeypointSeries::from_frames(&frames) {
        Ok(series) => series,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };
    let load_ms = load_start.elapsed().as_secs_f64() * 1000.0;

    if empty_frames > 0 {
        warn!(
            "{empty_frames} of {} frames had no detected people; positions will be reconstructed by interpolation.",
            files.len()
        );
    }

    let clean_start = Instant::now();
    cleaner::clean(&mut series, &config);
    let clean_ms = clean_start.elapsed().as_secs_f64() * 1000.0;

    let offset_table = offsets::compute_offsets(&series, &skeleton, &config);

    let write_start = Instant::now();
    if let Err(e) = writer::write_bvh(output, &series, &skeleton, &offset_table, &config) {
        error!("{e}");
        process::exit(1);
    }
    let write_ms = write_start.elapsed().as_secs_f64() * 1000.0;

    verbose!(
        "Speed: {load_ms:.1}ms load, {clean_ms:.1}ms clean, {write_ms:.1}ms write ({} frames, {} joints, {} channels)",
        series.len(),
        skeleton.len(),
        skeleton.channel_count()
    );
    success!("BVH saved: {}", output.display());
}
