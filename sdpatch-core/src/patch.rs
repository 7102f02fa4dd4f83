//! The frame patch engine.
//!
//! For each aligned HD/SD frame pair, the engine crops the SD frame to the
//! calibrated SD region, resizes the crop back up to the HD region size with
//! bilinear filtering, and overwrites the HD pixels in place. Any per-frame
//! failure (unreadable image, out-of-bounds region, write error) skips that
//! frame and the loop continues; the frame is simply absent from the output
//! sequence.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::RgbImage;
use log::{debug, warn};

use crate::error::{CoreError, CoreResult};
use crate::region::CalibrationContext;

/// Counts of frames handled by one patch loop run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchStats {
    pub patched: u64,
    pub skipped: u64,
}

/// Computes the number of frame pairs to attempt for one video pair.
///
/// Bounded by both extracted frame counts and by the SD stream's true
/// duration expressed in HD frames: `floor(sd_duration * hd_fps)`. Frame
/// totals can drift between two independently encoded copies of the same
/// footage, so the duration bound keeps the loop from walking past where the
/// shorter stream has real content. A missing or unusable duration falls
/// back to the plain frame-count minimum.
pub fn compute_frame_limit(
    hd_count: usize,
    sd_count: usize,
    sd_duration_secs: Option<f64>,
    hd_fps: f64,
) -> usize {
    let count_limit = hd_count.min(sd_count);
    match sd_duration_secs {
        Some(duration) if duration.is_finite() && duration >= 0.0 => {
            let duration_frames = (duration * hd_fps).floor() as usize;
            count_limit.min(duration_frames)
        }
        _ => count_limit,
    }
}

/// Overwrites the HD watermark region with a bilinear-resized crop of the SD
/// region. Pure pixel operation; deterministic and idempotent for the same
/// inputs.
pub fn patch_frame(
    hd: &mut RgbImage,
    sd: &RgbImage,
    ctx: &CalibrationContext,
) -> CoreResult<()> {
    if !ctx.hd.fits_within(hd.width(), hd.height()) {
        return Err(CoreError::InvalidRegion(format!(
            "HD region {}x{}+{}+{} outside frame {}x{}",
            ctx.hd.width,
            ctx.hd.height,
            ctx.hd.x,
            ctx.hd.y,
            hd.width(),
            hd.height()
        )));
    }
    if ctx.sd.width == 0 || ctx.sd.height == 0 || !ctx.sd.fits_within(sd.width(), sd.height()) {
        return Err(CoreError::InvalidRegion(format!(
            "SD region {}x{}+{}+{} outside frame {}x{}",
            ctx.sd.width,
            ctx.sd.height,
            ctx.sd.x,
            ctx.sd.y,
            sd.width(),
            sd.height()
        )));
    }

    let crop = imageops::crop_imm(sd, ctx.sd.x, ctx.sd.y, ctx.sd.width, ctx.sd.height).to_image();
    let resized = imageops::resize(&crop, ctx.hd.width, ctx.hd.height, FilterType::Triangle);
    imageops::replace(hd, &resized, i64::from(ctx.hd.x), i64::from(ctx.hd.y));
    Ok(())
}

/// Runs the patch loop over two sorted frame sequences in lockstep.
///
/// At most `frame_limit` pairs are attempted; index `i` of the HD sequence is
/// paired with index `i` of the SD sequence. Successfully patched frames are
/// written to `out_dir` under their HD filename; failed frames are logged and
/// skipped.
pub fn run_patch_loop(
    frames_hd: &[PathBuf],
    frames_sd: &[PathBuf],
    out_dir: &Path,
    ctx: &CalibrationContext,
    frame_limit: usize,
) -> CoreResult<PatchStats> {
    let mut stats = PatchStats::default();

    for (hd_path, sd_path) in frames_hd.iter().zip(frames_sd.iter()).take(frame_limit) {
        let mut hd_img = match image::open(hd_path) {
            Ok(img) => img.to_rgb8(),
            Err(e) => {
                warn!("Unreadable HD frame {}: {e}. Frame skipped.", hd_path.display());
                stats.skipped += 1;
                continue;
            }
        };
        let sd_img = match image::open(sd_path) {
            Ok(img) => img.to_rgb8(),
            Err(e) => {
                warn!("Unreadable SD frame {}: {e}. Frame skipped.", sd_path.display());
                stats.skipped += 1;
                continue;
            }
        };

        if let Err(e) = patch_frame(&mut hd_img, &sd_img, ctx) {
            warn!("Patch failed for {}: {e}. Frame skipped.", hd_path.display());
            stats.skipped += 1;
            continue;
        }

        let out_name = match hd_path.file_name() {
            Some(name) => name,
            None => {
                warn!("HD frame path has no filename: {}. Frame skipped.", hd_path.display());
                stats.skipped += 1;
                continue;
            }
        };
        let out_path = out_dir.join(out_name);
        if let Err(e) = hd_img.save(&out_path) {
            warn!("Failed to write {}: {e}. Frame skipped.", out_path.display());
            let _ = std::fs::remove_file(&out_path);
            stats.skipped += 1;
            continue;
        }
        stats.patched += 1;
    }

    debug!(
        "Patch loop done: {} patched, {} skipped (limit {})",
        stats.patched, stats.skipped, frame_limit
    );
    Ok(stats)
}
