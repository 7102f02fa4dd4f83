//! HD/SD file pairing via a shared filename code.
//!
//! Each HD video carries a unique run of 16 uppercase-alphanumeric characters
//! in its filename; the SD counterpart embeds the same run. Matching is
//! case-sensitive and performs no normalization.

use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;

static PAIR_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9A-Z]{16}").expect("pair code regex is valid"));

/// Extracts the first 16-character uppercase-alphanumeric run from a filename.
///
/// Returns `None` when the name contains no such run.
pub fn pair_code(name: &str) -> Option<&str> {
    PAIR_CODE_RE.find(name).map(|m| m.as_str())
}

/// Finds the SD counterpart of an HD filename among the given candidates.
///
/// Returns the first candidate whose filename contains the HD file's pair
/// code, or `None` when the HD name has no code or no candidate contains it.
/// Codes are assumed unique within a batch; if several candidates share one,
/// the first in the given ordering wins.
pub fn find_matching_sd<'a>(hd_name: &str, sd_files: &'a [PathBuf]) -> Option<&'a PathBuf> {
    let code = pair_code(hd_name)?;
    sd_files.iter().find(|sd| {
        sd.file_name()
            .map(|name| name.to_string_lossy().contains(code))
            .unwrap_or(false)
    })
}
