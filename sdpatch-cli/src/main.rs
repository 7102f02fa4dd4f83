// sdpatch-cli/src/main.rs
//
// Command-line interface for the sdpatch watermark region replacement tool.
//
// Responsibilities:
// - Parsing user-provided arguments.
// - Setting up logging to both console and file.
// - Checking that ffmpeg and ffprobe are available.
// - Configuring sdpatch-core and invoking the patch pipeline.
// - Displaying a summary of results and managing the process exit code.

use std::fs;
use std::process;
use std::time::Instant;

use clap::Parser;
use colored::Colorize;
use log::{info, warn};
use sdpatch_cli::cli::{Cli, Commands, PatchArgs};
use sdpatch_cli::logging::setup_logging;
use sdpatch_cli::prompt::PromptRegionProvider;
use sdpatch_core::external::{check_dependency, CrateFfprobeExecutor, SidecarFfmpegExecutor};
use sdpatch_core::region::FixedRegionProvider;
use sdpatch_core::{format_duration, process_videos, CoreConfig, PatchSummary};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Patch(args) => run_patch(args),
    };

    if let Err(e) = result {
        eprintln!("{} {e}", "Error:".red().bold());
        process::exit(1);
    }
}

fn run_patch(args: PatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let total_start_time = Instant::now();

    // --- Determine Paths ---
    let hd_dir = args
        .hd_dir
        .canonicalize()
        .map_err(|e| format!("Invalid HD directory '{}': {e}", args.hd_dir.display()))?;
    let sd_dir = args
        .sd_dir
        .canonicalize()
        .map_err(|e| format!("Invalid SD directory '{}': {e}", args.sd_dir.display()))?;
    let output_dir = args.output_dir;
    let log_dir = args.log_dir.unwrap_or_else(|| output_dir.join("logs"));

    fs::create_dir_all(&output_dir)?;
    fs::create_dir_all(&log_dir)?;

    // --- Setup Logging ---
    let log_path = setup_logging(&log_dir)?;
    info!("Logging to {}", log_path.display());

    // --- Check External Dependencies ---
    info!("{}", "Checking for required external commands...".cyan());
    check_dependency("ffmpeg")?;
    info!("  {} ffmpeg found.", "[OK]".green().bold());
    check_dependency("ffprobe")?;
    info!("  {} ffprobe found.", "[OK]".green().bold());

    // --- Configure Core ---
    let mut config = CoreConfig::new(hd_dir, sd_dir, output_dir);
    if let Some(fps) = args.fps_fallback {
        config.fallback_fps = fps;
    }
    config.validate()?;

    // --- Run Pipeline ---
    let ffmpeg = SidecarFfmpegExecutor;
    let ffprobe = CrateFfprobeExecutor::new();
    let summaries = match args.region {
        Some(region) => process_videos(&ffmpeg, &ffprobe, &FixedRegionProvider(region), &config)?,
        None => process_videos(&ffmpeg, &ffprobe, &PromptRegionProvider, &config)?,
    };

    print_summary(&summaries, total_start_time);
    Ok(())
}

fn print_summary(summaries: &[PatchSummary], total_start_time: Instant) {
    if summaries.is_empty() {
        warn!("No output files were produced.");
        return;
    }

    info!("{}", "Summary:".cyan().bold());
    for summary in summaries {
        info!(
            "  {} -> {} ({} patched, {} skipped of {} attempted) in {}",
            summary.filename.yellow(),
            summary.output_path.display(),
            summary.frames_patched.to_string().green(),
            summary.frames_skipped,
            summary.frame_limit,
            format_duration(summary.duration.as_secs_f64())
        );
    }
    info!(
        "Processed {} file(s) in {}",
        summaries.len().to_string().green().bold(),
        format_duration(total_start_time.elapsed().as_secs_f64())
    );
}
