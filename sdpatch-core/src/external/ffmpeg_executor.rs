//! FFmpeg process execution behind the `FfmpegExecutor` trait.
//!
//! The concrete implementation drives ffmpeg through the ffmpeg-sidecar
//! crate. Every invocation blocks until the subprocess exits; no retries are
//! performed.

use std::path::Path;

use ffmpeg_sidecar::command::FfmpegCommand;

use crate::error::{command_failed_error, command_start_error, command_wait_error, CoreResult};
use crate::frames;

/// The external video-tool operations the pipeline depends on.
///
/// Modeled as a trait so the orchestrator can be exercised under injected
/// fakes without ffmpeg installed.
pub trait FfmpegExecutor {
    /// Decodes `video` into a numbered `frame_%05d.png` sequence in
    /// `frames_dir`.
    fn extract_frames(&self, video: &Path, frames_dir: &Path) -> CoreResult<()>;

    /// Decodes only the first frame of `video` into `image_path`.
    fn extract_reference_frame(&self, video: &Path, image_path: &Path) -> CoreResult<()>;

    /// Stream-copies the audio track of `video` into `audio_path` without
    /// re-encoding. Must not leave a partial file behind on failure.
    fn extract_audio(&self, video: &Path, audio_path: &Path) -> CoreResult<()>;

    /// Encodes the frame sequence in `frames_dir` (plus `audio`, when
    /// present) into `output` at the given frame rate. Must tolerate gaps in
    /// the frame numbering left by skipped frames.
    fn assemble_video(
        &self,
        frames_dir: &Path,
        audio: Option<&Path>,
        output: &Path,
        fps: f64,
    ) -> CoreResult<()>;
}

/// Concrete `FfmpegExecutor` using ffmpeg-sidecar.
#[derive(Debug, Clone, Default)]
pub struct SidecarFfmpegExecutor;

/// Spawns the command, waits for completion and checks the exit status.
fn run_to_completion(mut cmd: FfmpegCommand, context: &str) -> CoreResult<()> {
    log::debug!("Running {context} command: {cmd:?}");
    let mut child = cmd
        .spawn()
        .map_err(|e| command_start_error(format!("ffmpeg ({context})"), e))?;
    let status = child
        .wait()
        .map_err(|e| command_wait_error(format!("ffmpeg ({context})"), e))?;
    if !status.success() {
        return Err(command_failed_error(
            format!("ffmpeg ({context})"),
            status,
            "process exited with failure",
        ));
    }
    Ok(())
}

impl FfmpegExecutor for SidecarFfmpegExecutor {
    fn extract_frames(&self, video: &Path, frames_dir: &Path) -> CoreResult<()> {
        let pattern = frames::frame_pattern(frames_dir);
        let mut cmd = FfmpegCommand::new();
        cmd.args(["-y"]);
        cmd.input(video.to_string_lossy().as_ref());
        cmd.output(pattern.to_string_lossy().as_ref());
        run_to_completion(cmd, "frame extraction")
    }

    fn extract_reference_frame(&self, video: &Path, image_path: &Path) -> CoreResult<()> {
        let mut cmd = FfmpegCommand::new();
        cmd.args(["-y"]);
        cmd.input(video.to_string_lossy().as_ref());
        cmd.args(["-frames:v", "1"]);
        cmd.output(image_path.to_string_lossy().as_ref());
        run_to_completion(cmd, "reference frame extraction")
    }

    fn extract_audio(&self, video: &Path, audio_path: &Path) -> CoreResult<()> {
        let mut cmd = FfmpegCommand::new();
        cmd.args(["-y"]);
        cmd.input(video.to_string_lossy().as_ref());
        cmd.args(["-vn", "-acodec", "copy"]);
        cmd.output(audio_path.to_string_lossy().as_ref());

        let result = run_to_completion(cmd, "audio extraction");
        if result.is_err() {
            // The contract forbids leaving a corrupt partial file behind
            let _ = std::fs::remove_file(audio_path);
        }
        result
    }

    fn assemble_video(
        &self,
        frames_dir: &Path,
        audio: Option<&Path>,
        output: &Path,
        fps: f64,
    ) -> CoreResult<()> {
        // Skipped frames leave holes in the numbering, so the %05d sequence
        // pattern would stop at the first gap. The glob pattern encodes
        // whatever frames exist, in filename order.
        let glob = frames_dir.join("*.png");

        let mut cmd = FfmpegCommand::new();
        cmd.args(["-y"]);
        cmd.args(["-framerate", &fps.to_string()]);
        cmd.args(["-pattern_type", "glob"]);
        cmd.input(glob.to_string_lossy().as_ref());
        if let Some(audio_path) = audio {
            cmd.input(audio_path.to_string_lossy().as_ref());
        }
        cmd.args(["-c:v", "libx264", "-crf", "18", "-preset", "slow"]);
        if audio.is_some() {
            // -shortest truncates the output to the shorter of video and audio
            cmd.args(["-c:a", "aac", "-b:a", "192k", "-shortest"]);
        }
        cmd.args(["-pix_fmt", "yuv420p"]);
        cmd.output(output.to_string_lossy().as_ref());
        run_to_completion(cmd, "video assembly")
    }
}
