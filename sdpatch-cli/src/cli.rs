// sdpatch-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Parser, Subcommand};
use sdpatch_core::region::WatermarkRegion;
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "sdpatch: watermark region replacement tool",
    long_about = "Replaces the watermarked region of HD videos with the matching \
                  region of their SD counterparts, using ffmpeg via the sdpatch-core library."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Patches watermarked HD videos using their SD counterparts
    Patch(PatchArgs),
}

#[derive(Parser, Debug)]
pub struct PatchArgs {
    /// Directory containing the watermarked HD source videos
    #[arg(long = "hd-dir", required = true, value_name = "HD_DIR")]
    pub hd_dir: PathBuf,

    /// Directory containing the SD reference videos
    #[arg(long = "sd-dir", required = true, value_name = "SD_DIR")]
    pub sd_dir: PathBuf,

    /// Directory where patched files will be saved
    #[arg(
        short = 'o',
        long = "output",
        value_name = "OUTPUT_DIR",
        default_value = "output"
    )]
    pub output_dir: PathBuf,

    /// Optional: Directory for log files (defaults to OUTPUT_DIR/logs)
    #[arg(short, long, value_name = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Watermark rectangle in HD pixel space. Without this flag the tool
    /// extracts a reference frame and prompts for the rectangle.
    #[arg(long, value_name = "X,Y,W,H", value_parser = parse_region)]
    pub region: Option<WatermarkRegion>,

    /// Optional: Frame rate assumed when probing the HD source fails
    #[arg(long, value_name = "FPS")]
    pub fps_fallback: Option<f64>,
}

fn parse_region(s: &str) -> Result<WatermarkRegion, String> {
    s.parse()
}
