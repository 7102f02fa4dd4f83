//! FFprobe integration for duration and frame-rate probing.

use std::path::Path;

use ffprobe::{ffprobe, FfProbeError};

use crate::error::{command_failed_error, command_start_error, CoreError, CoreResult};

/// Media probing operations the pipeline depends on.
pub trait FfprobeExecutor {
    /// Returns the container duration of `input` in seconds.
    fn duration_secs(&self, input: &Path) -> CoreResult<f64>;

    /// Returns the average frame rate of the first video stream of `input`.
    fn frame_rate(&self, input: &Path) -> CoreResult<f64>;
}

/// Concrete `FfprobeExecutor` using the ffprobe crate.
#[derive(Debug, Clone, Default)]
pub struct CrateFfprobeExecutor;

impl CrateFfprobeExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl FfprobeExecutor for CrateFfprobeExecutor {
    fn duration_secs(&self, input: &Path) -> CoreResult<f64> {
        log::debug!("Running ffprobe for duration on: {}", input.display());
        match ffprobe(input) {
            Ok(metadata) => metadata
                .format
                .duration
                .as_deref()
                .and_then(|d| d.parse::<f64>().ok())
                .ok_or_else(|| {
                    CoreError::FfprobeParse(format!(
                        "Failed to parse duration from format for {}",
                        input.display()
                    ))
                }),
            Err(err) => {
                log::warn!("ffprobe failed for duration on {}: {err:?}", input.display());
                Err(map_ffprobe_error(err, "duration"))
            }
        }
    }

    fn frame_rate(&self, input: &Path) -> CoreResult<f64> {
        log::debug!("Running ffprobe for frame rate on: {}", input.display());
        match ffprobe(input) {
            Ok(metadata) => {
                let video_stream = metadata
                    .streams
                    .iter()
                    .find(|s| s.codec_type.as_deref() == Some("video"))
                    .ok_or_else(|| {
                        CoreError::VideoInfoError(format!(
                            "No video stream found in {}",
                            input.display()
                        ))
                    })?;

                parse_rate(&video_stream.avg_frame_rate).ok_or_else(|| {
                    CoreError::FfprobeParse(format!(
                        "Unusable avg_frame_rate '{}' for {}",
                        video_stream.avg_frame_rate,
                        input.display()
                    ))
                })
            }
            Err(err) => {
                log::warn!(
                    "ffprobe failed for frame rate on {}: {err:?}",
                    input.display()
                );
                Err(map_ffprobe_error(err, "frame rate"))
            }
        }
    }
}

/// Parses an ffprobe rate string, either a fraction like "24000/1001" or a
/// plain number. Returns None for zero, negative or malformed rates.
fn parse_rate(rate: &str) -> Option<f64> {
    let value = match rate.split_once('/') {
        Some((num, den)) => {
            let num = num.trim().parse::<f64>().ok()?;
            let den = den.trim().parse::<f64>().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => rate.trim().parse::<f64>().ok()?,
    };
    (value.is_finite() && value > 0.0).then_some(value)
}

fn map_ffprobe_error(err: FfProbeError, context: &str) -> CoreError {
    match err {
        FfProbeError::Io(io_err) => command_start_error(format!("ffprobe ({context})"), io_err),
        FfProbeError::Status(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            command_failed_error(format!("ffprobe ({context})"), output.status, stderr)
        }
        FfProbeError::Deserialize(err) => CoreError::FfprobeParse(format!(
            "ffprobe {context} output deserialization: {err}"
        )),
        _ => CoreError::FfprobeParse(format!("Unknown ffprobe error during {context}: {err:?}")),
    }
}
