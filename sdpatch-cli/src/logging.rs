// sdpatch-cli/src/logging.rs
//
// Logging setup: combined console and timestamped file output via fern.
// Verbosity follows the standard log levels; RUST_LOG is not consulted
// because the dispatch level is fixed at Info.

use std::path::{Path, PathBuf};

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
///
/// Used to generate unique log file names per run.
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Installs a fern dispatcher writing to stdout and to
/// `<log_dir>/sdpatch_run_<timestamp>.log`. Returns the log file path.
pub fn setup_logging(log_dir: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let log_path = log_dir.join(format!("sdpatch_run_{}.log", get_timestamp()));

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .chain(std::io::stdout())
        .chain(fern::log_file(&log_path)?)
        .apply()?;

    Ok(log_path)
}
