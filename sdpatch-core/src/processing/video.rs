//! Main patch pipeline orchestration.
//!
//! Drives the per-video-pair sequence across a batch of HD videos matched to
//! SD videos: one-time region calibration against the first matched pair,
//! then for every HD file extract frames and audio, bound the frame count by
//! the SD stream's true duration, run the patch loop and reassemble the
//! output. Per-pair failures after calibration skip only that pair.

use std::path::Path;
use std::time::Instant;

use colored::Colorize;
use log::{error, info, warn};
use tempfile::Builder as TempFileBuilder;

use crate::config::{CoreConfig, OUTPUT_SUFFIX};
use crate::discovery::find_video_files;
use crate::error::{CoreError, CoreResult};
use crate::external::{FfmpegExecutor, FfprobeExecutor};
use crate::frames::list_frames;
use crate::matching::find_matching_sd;
use crate::patch::{compute_frame_limit, run_patch_loop};
use crate::region::{CalibrationContext, RegionProvider};
use crate::temp_files::PairWorkspace;
use crate::utils::get_filename_safe;
use crate::PatchSummary;

/// Processes every HD video in the configured batch.
///
/// The function is generic over the external collaborators so tests can
/// inject fakes:
/// - `F`: executes ffmpeg (frame/audio extraction, assembly)
/// - `P`: executes ffprobe (duration, frame rate)
/// - `R`: supplies the operator-selected watermark rectangle
///
/// Calibration runs exactly once, against the first HD file and its SD
/// match; a failure there aborts the whole run since no later pair could be
/// patched either. Returns one `PatchSummary` per successfully assembled
/// output.
pub fn process_videos<F: FfmpegExecutor, P: FfprobeExecutor, R: RegionProvider>(
    ffmpeg: &F,
    ffprobe: &P,
    region_provider: &R,
    config: &CoreConfig,
) -> CoreResult<Vec<PatchSummary>> {
    config.validate()?;

    let hd_files = find_video_files(&config.hd_dir)?;
    let sd_files = find_video_files(&config.sd_dir)?;
    info!(
        "Found {} HD file(s) and {} SD file(s)",
        hd_files.len().to_string().green(),
        sd_files.len().to_string().green()
    );

    // ---- One-time calibration against the first matched pair ----
    let ctx = calibrate_batch(ffmpeg, region_provider, config, &hd_files, &sd_files)?;

    std::fs::create_dir_all(&config.output_dir)?;

    let mut results: Vec<PatchSummary> = Vec::new();

    for hd_path in &hd_files {
        let filename = get_filename_safe(hd_path)?;
        info!("{} {}", "Processing:".cyan().bold(), filename.yellow());

        let sd_path = match find_matching_sd(&filename, &sd_files) {
            Some(path) => path,
            None => {
                warn!("No matching SD video for {filename}, skipping.");
                info!("----------------------------------------");
                continue;
            }
        };

        match process_pair(ffmpeg, ffprobe, config, &ctx, hd_path, sd_path, &filename) {
            Ok(summary) => {
                info!(
                    "{} {} ({} patched, {} skipped)",
                    "Completed:".green().bold(),
                    summary.output_path.display(),
                    summary.frames_patched,
                    summary.frames_skipped
                );
                results.push(summary);
            }
            Err(e) => {
                error!("Failed to process {filename}: {e}. Skipping pair.");
            }
        }
        info!("----------------------------------------");
    }

    Ok(results)
}

/// Establishes the fixed calibration for the whole batch.
///
/// Extracts the first frame of the first HD file and of its SD match, reads
/// both frame dimensions, obtains the HD rectangle from the region provider
/// and scales it into SD space. Every failure here is fatal.
fn calibrate_batch<F: FfmpegExecutor, R: RegionProvider>(
    ffmpeg: &F,
    region_provider: &R,
    config: &CoreConfig,
    hd_files: &[std::path::PathBuf],
    sd_files: &[std::path::PathBuf],
) -> CoreResult<CalibrationContext> {
    let first_hd = &hd_files[0];
    let first_hd_name = get_filename_safe(first_hd)?;

    let first_sd = find_matching_sd(&first_hd_name, sd_files)
        .ok_or_else(|| CoreError::NoCalibrationMatch(first_hd_name.clone()))?;

    let temp_base = config.temp_dir.clone().unwrap_or_else(std::env::temp_dir);
    std::fs::create_dir_all(&temp_base)?;
    let calib_dir = TempFileBuilder::new()
        .prefix("sdpatch_calib_")
        .tempdir_in(&temp_base)?;

    let hd_reference = calib_dir.path().join("reference_hd.png");
    let sd_reference = calib_dir.path().join("reference_sd.png");

    ffmpeg
        .extract_reference_frame(first_hd, &hd_reference)
        .map_err(|e| CoreError::ReferenceFrame(format!("{}: {e}", first_hd.display())))?;
    ffmpeg
        .extract_reference_frame(first_sd, &sd_reference)
        .map_err(|e| CoreError::ReferenceFrame(format!("{}: {e}", first_sd.display())))?;

    let hd_dims = image::image_dimensions(&hd_reference)
        .map_err(|e| CoreError::ReferenceFrame(format!("{}: {e}", hd_reference.display())))?;
    let sd_dims = image::image_dimensions(&sd_reference)
        .map_err(|e| CoreError::ReferenceFrame(format!("{}: {e}", sd_reference.display())))?;

    let hd_region = region_provider.select_region(&hd_reference)?;
    let ctx = CalibrationContext::calibrate(hd_region, hd_dims, sd_dims)?;

    info!(
        "Watermark region HD: ({}, {}, {}, {})",
        ctx.hd.x, ctx.hd.y, ctx.hd.width, ctx.hd.height
    );
    info!(
        "Watermark region SD: ({}, {}, {}, {})",
        ctx.sd.x, ctx.sd.y, ctx.sd.width, ctx.sd.height
    );

    Ok(ctx)
}

/// Runs the full extract → probe → patch → assemble sequence for one pair.
fn process_pair<F: FfmpegExecutor, P: FfprobeExecutor>(
    ffmpeg: &F,
    ffprobe: &P,
    config: &CoreConfig,
    ctx: &CalibrationContext,
    hd_path: &Path,
    sd_path: &Path,
    filename: &str,
) -> CoreResult<PatchSummary> {
    let pair_start_time = Instant::now();
    let workspace = PairWorkspace::new(config)?;

    info!("  Extracting HD frames...");
    ffmpeg.extract_frames(hd_path, &workspace.frames_hd())?;
    info!("  Extracting SD frames...");
    ffmpeg.extract_frames(sd_path, &workspace.frames_sd())?;

    info!("  Extracting audio...");
    let audio_path = workspace.audio_path();
    let audio = match ffmpeg.extract_audio(hd_path, &audio_path) {
        Ok(()) => Some(audio_path),
        Err(e) => {
            warn!("Audio extraction failed for {filename}: {e}. Proceeding without audio.");
            None
        }
    };

    let frames_hd = list_frames(&workspace.frames_hd())?;
    let frames_sd = list_frames(&workspace.frames_sd())?;

    let fps = match ffprobe.frame_rate(hd_path) {
        Ok(rate) if rate > 0.0 => rate,
        Ok(rate) => {
            warn!("Unusable frame rate {rate} for {filename}, assuming {}", config.fallback_fps);
            config.fallback_fps
        }
        Err(e) => {
            warn!(
                "Could not probe frame rate for {filename}: {e}. Assuming {}.",
                config.fallback_fps
            );
            config.fallback_fps
        }
    };

    let sd_duration = match ffprobe.duration_secs(sd_path) {
        Ok(duration) => Some(duration),
        Err(e) => {
            warn!(
                "Could not probe SD duration for {}: {e}. Treating all available frames as within range.",
                sd_path.display()
            );
            None
        }
    };

    let frame_limit = compute_frame_limit(frames_hd.len(), frames_sd.len(), sd_duration, fps);
    info!(
        "  {} HD / {} SD frames extracted, patching up to {}",
        frames_hd.len(),
        frames_sd.len(),
        frame_limit.to_string().green()
    );

    let stats = run_patch_loop(&frames_hd, &frames_sd, &workspace.frames_out(), ctx, frame_limit)?;
    if stats.patched == 0 {
        return Err(CoreError::VideoInfoError(format!(
            "No frames were successfully patched for {filename}"
        )));
    }

    let output_stem = hd_path
        .file_stem()
        .ok_or_else(|| CoreError::PathError(format!("No file stem for {}", hd_path.display())))?
        .to_string_lossy();
    let output_path = config
        .output_dir
        .join(format!("{output_stem}{OUTPUT_SUFFIX}.mp4"));

    info!("  Assembling {}...", output_path.display());
    ffmpeg.assemble_video(&workspace.frames_out(), audio.as_deref(), &output_path, fps)?;

    Ok(PatchSummary {
        filename: filename.to_string(),
        output_path,
        frames_patched: stats.patched,
        frames_skipped: stats.skipped,
        frame_limit,
        duration: pair_start_time.elapsed(),
    })
}
