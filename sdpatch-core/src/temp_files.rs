//! Scoped working directories for one video pair.
//!
//! Each pair gets a fresh temporary directory with fixed subdirectories for
//! the extracted HD frames, extracted SD frames and patched output frames,
//! plus a path for the stream-copied audio. The tempfile crate removes the
//! whole tree on drop, so stale frames from a previous pair can never leak
//! into the next one and cleanup happens on every exit path.

use std::path::{Path, PathBuf};

use tempfile::{Builder as TempFileBuilder, TempDir};

use crate::config::CoreConfig;
use crate::error::CoreResult;

const FRAMES_HD_DIR: &str = "frames_hd";
const FRAMES_SD_DIR: &str = "frames_sd";
const FRAMES_OUT_DIR: &str = "frames_out";
const AUDIO_FILE: &str = "audio.aac";

/// Working directories for one HD/SD pair. Removed when dropped.
#[derive(Debug)]
pub struct PairWorkspace {
    temp_dir: TempDir,
}

impl PairWorkspace {
    /// Creates the per-pair workspace under `config.temp_dir` (or the system
    /// temp directory) with all subdirectories in place.
    pub fn new(config: &CoreConfig) -> CoreResult<Self> {
        let temp_base = config
            .temp_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir);
        std::fs::create_dir_all(&temp_base)?;

        let temp_dir = TempFileBuilder::new()
            .prefix("sdpatch_")
            .tempdir_in(&temp_base)?;

        for sub in [FRAMES_HD_DIR, FRAMES_SD_DIR, FRAMES_OUT_DIR] {
            std::fs::create_dir(temp_dir.path().join(sub))?;
        }

        Ok(Self { temp_dir })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Directory receiving the extracted HD frames.
    pub fn frames_hd(&self) -> PathBuf {
        self.temp_dir.path().join(FRAMES_HD_DIR)
    }

    /// Directory receiving the extracted SD frames.
    pub fn frames_sd(&self) -> PathBuf {
        self.temp_dir.path().join(FRAMES_SD_DIR)
    }

    /// Directory receiving the patched output frames.
    pub fn frames_out(&self) -> PathBuf {
        self.temp_dir.path().join(FRAMES_OUT_DIR)
    }

    /// Target path for the stream-copied audio track.
    pub fn audio_path(&self) -> PathBuf {
        self.temp_dir.path().join(AUDIO_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_workspace_layout_and_cleanup() {
        let base = tempfile::tempdir().unwrap();
        let mut config = CoreConfig::new(
            PathBuf::from("hd"),
            PathBuf::from("sd"),
            PathBuf::from("out"),
        );
        config.temp_dir = Some(base.path().to_path_buf());

        let root;
        {
            let workspace = PairWorkspace::new(&config).unwrap();
            root = workspace.path().to_path_buf();
            assert!(workspace.frames_hd().is_dir());
            assert!(workspace.frames_sd().is_dir());
            assert!(workspace.frames_out().is_dir());
            assert_eq!(workspace.audio_path().file_name().unwrap(), "audio.aac");
        }
        // Dropped workspace removes the whole tree
        assert!(!root.exists());
    }

    #[test]
    fn test_consecutive_workspaces_are_disjoint() {
        let base = tempfile::tempdir().unwrap();
        let mut config = CoreConfig::new(
            PathBuf::from("hd"),
            PathBuf::from("sd"),
            PathBuf::from("out"),
        );
        config.temp_dir = Some(base.path().to_path_buf());

        let first = PairWorkspace::new(&config).unwrap();
        let second = PairWorkspace::new(&config).unwrap();
        assert_ne!(first.path(), second.path());
    }
}
