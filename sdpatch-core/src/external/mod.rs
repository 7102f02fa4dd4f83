//! Interactions with external CLI tools.
//!
//! This module encapsulates the ffmpeg and ffprobe invocations the pipeline
//! depends on. Each tool sits behind a trait so consumers (and tests) can
//! inject their own implementations; the default implementations use the
//! ffmpeg-sidecar and ffprobe crates.

use std::io;
use std::process::{Command, Stdio};

use crate::error::{command_start_error, CoreError, CoreResult};

/// Contains the trait and implementation for executing ffmpeg commands
pub mod ffmpeg_executor;

/// Contains the trait and implementation for executing ffprobe commands
pub mod ffprobe_executor;

pub use ffmpeg_executor::{FfmpegExecutor, SidecarFfmpegExecutor};
pub use ffprobe_executor::{CrateFfprobeExecutor, FfprobeExecutor};

/// Checks that a required external command is available and executable.
///
/// Runs the command with `-version` and discards its output. Used at startup
/// to verify ffmpeg and ffprobe are on the PATH before any work begins.
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {cmd_name}");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{cmd_name}' not found.");
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{cmd_name}': {e}");
            Err(command_start_error(cmd_name, e))
        }
    }
}
