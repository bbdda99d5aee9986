// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use clap::Parser;

use pose2bvh::cli::args::{Cli, Commands};
use pose2bvh::cli::convert::run_conversion;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert(args) => run_conversion(&args),
    }
}
