//! Error types for the sdpatch core library.

use std::process::ExitStatus;
use thiserror::Error;

/// Custom error types for sdpatch
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No processable video files found")]
    NoFilesFound,

    #[error("Invalid path: {0}")]
    PathError(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid watermark region: {0}")]
    InvalidRegion(String),

    #[error("No SD counterpart found for calibration file: {0}")]
    NoCalibrationMatch(String),

    #[error("Failed to read reference frame: {0}")]
    ReferenceFrame(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Dependency not found: {0}")]
    DependencyNotFound(String),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, String),

    #[error("Command '{cmd}' failed with status {status}: {stderr}")]
    CommandFailed {
        cmd: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Failed waiting for command '{0}': {1}")]
    CommandWait(String, String),

    #[error("ffprobe parse error: {0}")]
    FfprobeParse(String),

    #[error("Video info error: {0}")]
    VideoInfoError(String),
}

/// Result type for sdpatch operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Builds a `CoreError::CommandStart` from anything displayable.
pub(crate) fn command_start_error(cmd: impl Into<String>, err: impl std::fmt::Display) -> CoreError {
    CoreError::CommandStart(cmd.into(), err.to_string())
}

/// Builds a `CoreError::CommandFailed` with captured status and stderr.
pub(crate) fn command_failed_error(
    cmd: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed {
        cmd: cmd.into(),
        status,
        stderr: stderr.into(),
    }
}

/// Builds a `CoreError::CommandWait` from anything displayable.
pub(crate) fn command_wait_error(cmd: impl Into<String>, err: impl std::fmt::Display) -> CoreError {
    CoreError::CommandWait(cmd.into(), err.to_string())
}
