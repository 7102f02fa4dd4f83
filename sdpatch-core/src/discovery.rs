//! File discovery module for finding video files to process.
//!
//! Scans the top level of a directory for .mp4, .mov and .avi files
//! (case-insensitive). Subdirectories are not searched.

use crate::error::{CoreError, CoreResult};

use std::path::{Path, PathBuf};

/// Extensions accepted as processable video files.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi"];

/// Finds video files eligible for processing in the specified directory.
///
/// The returned paths are sorted by filename so that HD and SD batches are
/// iterated in a stable order.
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - Sorted paths of the discovered video files
/// * `Err(CoreError::NoFilesFound)` - If no video files are found
pub fn find_video_files(input_dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let read_dir = std::fs::read_dir(input_dir)?;
    let mut files: Vec<PathBuf> = read_dir
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();

            if !path.is_file() {
                return None;
            }

            path.extension()
                .and_then(|ext| ext.to_str())
                .filter(|ext_str| {
                    VIDEO_EXTENSIONS
                        .iter()
                        .any(|allowed| ext_str.eq_ignore_ascii_case(allowed))
                })
                .map(|_| path.clone())
        })
        .collect();

    files.sort();

    if files.is_empty() {
        Err(CoreError::NoFilesFound)
    } else {
        Ok(files)
    }
}
