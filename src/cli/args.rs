// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use clap::{Args, Parser, Subcommand};

/// CLI arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = r#"Convert Options:
    --source, -s <SOURCE>  Directory of per-frame *_keypoints.json files
    --output, -o <OUTPUT>  Output BVH file path [default: output/motion.bvh]
    --fps <FPS>            Output frame rate [default: 30]
    --conf <CONF>          Confidence threshold [default: 0.1]
    --smooth-window <N>    Moving-average window in frames [default: 5]
    --scale <SCALE>        Pixel to output-unit scale [default: 0.01]
    --z-offset <Z>         Constant depth offset [default: 0.05]
    --keypoints <N>        Keypoints per detection record [default: 25]
    --verbose              Show verbose output

Examples:
    pose2bvh convert --source openpose_json/video5
    pose2bvh convert --source openpose_json/video5 --output output/video5.bvh
    pose2bvh convert -s openpose_json/video5 -o output/video5.bvh --fps 24
    pose2bvh convert -s detections/ --conf 0.2 --smooth-window 9"#)]
pub struct Cli {
    #[command(subcommand)]
    /// Subcommand to execute.
    pub command: Commands,
}

/// Commands for the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a directory of keypoint detections into a BVH file
    Convert(ConvertArgs),
}

/// Arguments for the convert command.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Directory of per-frame detection files
    #[arg(short, long)]
    pub source: String,

    /// Output BVH file path
    #[arg(short, long, default_value = "output/motion.bvh")]
    pub output: String,

    /// Output frame rate
    #[arg(long, default_value_t = 30.0)]
    pub fps: f32,

    /// Confidence threshold below which keypoints are discarded
    #[arg(long, default_value_t = 0.1)]
    pub conf: f32,

    /// Centered moving-average window in frames
    #[arg(long, default_value_t = 5)]
    pub smooth_window: usize,

    /// Pixel to output-unit scale factor
    #[arg(long, default_value_t = 0.01)]
    pub scale: f32,

    /// Constant depth offset for bone offsets and root translation
    #[arg(long, default_value_t = 0.05)]
    pub z_offset: f32,

    /// Keypoints per detection record
    #[arg(long, default_value_t = 25)]
    pub keypoints: usize,

    /// Show verbose output
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub verbose: bool,
}
