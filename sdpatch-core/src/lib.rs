//! Core library for replacing a burned-in watermark region in HD videos
//! using an SD reference copy of the same footage, driven by ffmpeg and
//! ffprobe.
//!
//! HD and SD files are paired by a shared 16-character filename code. A
//! single operator-selected rectangle is calibrated once from the first
//! matched pair, then every pair is processed frame by frame: the SD region
//! is cropped, bilinear-resized and pasted over the HD watermark, and the
//! patched frames are reassembled with the original audio.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use sdpatch_core::{CoreConfig, process_videos};
//! use sdpatch_core::external::{CrateFfprobeExecutor, SidecarFfmpegExecutor};
//! use sdpatch_core::region::{FixedRegionProvider, WatermarkRegion};
//! use std::path::PathBuf;
//!
//! let config = CoreConfig::new(
//!     PathBuf::from("/path/to/hd"),
//!     PathBuf::from("/path/to/sd"),
//!     PathBuf::from("output"),
//! );
//! config.validate().unwrap();
//!
//! let region = FixedRegionProvider(WatermarkRegion::new(1520, 40, 320, 90));
//! let summaries = process_videos(
//!     &SidecarFfmpegExecutor,
//!     &CrateFfprobeExecutor::new(),
//!     &region,
//!     &config,
//! ).unwrap();
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod frames;
pub mod matching;
pub mod patch;
pub mod processing;
pub mod region;
pub mod temp_files;
pub mod utils;

// Re-exports for public API
pub use config::CoreConfig;
pub use discovery::find_video_files;
pub use error::{CoreError, CoreResult};
pub use matching::{find_matching_sd, pair_code};
pub use patch::{compute_frame_limit, PatchStats};
pub use processing::process_videos;
pub use region::{CalibrationContext, FixedRegionProvider, RegionProvider, WatermarkRegion};
pub use utils::format_duration;

use std::path::PathBuf;
use std::time::Duration;

/// Result of patching one video pair, returned by `process_videos` for each
/// successfully assembled output file.
#[derive(Debug, Clone)]
pub struct PatchSummary {
    pub filename: String,
    pub output_path: PathBuf,
    pub frames_patched: u64,
    pub frames_skipped: u64,
    pub frame_limit: usize,
    pub duration: Duration,
}
