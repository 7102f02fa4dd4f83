//! Core configuration structures and constants.
//!
//! Instances of `CoreConfig` are created by consumers of the library (like
//! sdpatch-cli) and passed to `process_videos` to control pipeline behavior.

use std::path::PathBuf;

use crate::error::{CoreError, CoreResult};

/// Frame rate used when the HD source does not report a usable one.
pub const DEFAULT_FALLBACK_FPS: f64 = 25.0;

/// Suffix appended to the HD file stem for the patched output file.
pub const OUTPUT_SUFFIX: &str = "_no_watermark";

/// Main configuration structure for the sdpatch-core library.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    // ---- Path Configuration ----
    /// Directory containing the watermarked HD source videos
    pub hd_dir: PathBuf,

    /// Directory containing the SD reference videos
    pub sd_dir: PathBuf,

    /// Directory where patched output files will be saved
    pub output_dir: PathBuf,

    /// Optional base directory for per-pair working directories
    /// (defaults to the system temp directory)
    pub temp_dir: Option<PathBuf>,

    // ---- Processing Options ----
    /// Frame rate assumed when probing the HD source fails
    pub fallback_fps: f64,
}

impl CoreConfig {
    /// Creates a configuration with default processing options.
    pub fn new(hd_dir: PathBuf, sd_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            hd_dir,
            sd_dir,
            output_dir,
            temp_dir: None,
            fallback_fps: DEFAULT_FALLBACK_FPS,
        }
    }

    /// Validates the configuration before processing starts.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.hd_dir.is_dir() {
            return Err(CoreError::Config(format!(
                "HD directory does not exist: {}",
                self.hd_dir.display()
            )));
        }
        if !self.sd_dir.is_dir() {
            return Err(CoreError::Config(format!(
                "SD directory does not exist: {}",
                self.sd_dir.display()
            )));
        }
        if !(self.fallback_fps.is_finite() && self.fallback_fps > 0.0) {
            return Err(CoreError::Config(format!(
                "Fallback frame rate must be positive, got {}",
                self.fallback_fps
            )));
        }
        Ok(())
    }
}
