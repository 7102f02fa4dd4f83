//! Frame-sequence helpers.
//!
//! Extracted frames are numbered `frame_00001.png`, `frame_00002.png`, ... in
//! decode order. Patched frames keep their HD filename, so a skipped frame
//! leaves a gap in the output numbering.

use std::path::{Path, PathBuf};

use crate::error::CoreResult;

/// printf-style pattern handed to ffmpeg for frame extraction.
pub const FRAME_PATTERN: &str = "frame_%05d.png";

/// Returns the extraction output pattern inside `dir`.
pub fn frame_pattern(dir: &Path) -> PathBuf {
    dir.join(FRAME_PATTERN)
}

/// Lists the .png frame files in `dir`, sorted by filename.
///
/// Filename order matches decode order for the zero-padded extraction
/// pattern, so index `i` of the HD listing pairs with index `i` of the SD
/// listing.
pub fn list_frames(dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let mut frames: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            let is_png = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("png"))
                .unwrap_or(false);
            (path.is_file() && is_png).then_some(path)
        })
        .collect();
    frames.sort();
    Ok(frames)
}
