//! Logger setup.
//!
//! Warnings go to stderr. Everything from debug up goes to `latest.log` in
//! the cache directory. The previous run's `latest.log` is kept under a
//! timestamped name, and only the newest [`KEEP_ARCHIVES`] of those survive.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use log::{LevelFilter, warn};
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};

use crate::paths;

const LATEST: &str = "latest.log";
const KEEP_ARCHIVES: usize = 25;

/// Install the stderr and file loggers.
///
/// Failing to set up the log file is not fatal; the problem is reported as a
/// warning once a logger is available, or on stderr if none is.
pub fn init() {
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    loggers.push(TermLogger::new(
        LevelFilter::Warn,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ));

    let mut problems = Vec::new();
    match paths::cache_dir() {
        Some(dir) => match open_log(&dir) {
            Ok(file) => loggers.push(WriteLogger::new(LevelFilter::Debug, Config::default(), file)),
            Err(e) => problems.push(format!("no log file in {}: {e}", dir.display())),
        },
        None => problems.push("no log file: home directory not found".to_string()),
    }

    match CombinedLogger::init(loggers) {
        Ok(()) => {
            for problem in &problems {
                warn!("{problem}");
            }
        }
        Err(e) => {
            eprintln!("warning: logging disabled: {e}");
            for problem in &problems {
                eprintln!("warning: {problem}");
            }
        }
    }
}

/// Archive the previous log in `dir`, prune old archives and open a fresh
/// `latest.log`.
fn open_log(dir: &Path) -> io::Result<File> {
    fs::create_dir_all(dir)?;
    let latest = dir.join(LATEST);
    if latest.exists() {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S%.3f");
        fs::rename(&latest, dir.join(format!("{stamp}.log")))?;
    }
    prune_archives(dir, KEEP_ARCHIVES)?;
    File::create(latest)
}

/// Delete all but the newest `keep` archived logs in `dir`. Returns how many
/// were deleted.
fn prune_archives(dir: &Path, keep: usize) -> io::Result<usize> {
    let mut archives: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_archive(path))
        .collect();
    // Timestamped names sort oldest first.
    archives.sort();

    let excess = archives.len().saturating_sub(keep);
    for path in &archives[..excess] {
        fs::remove_file(path)?;
    }
    Ok(excess)
}

fn is_archive(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "log")
        && path.file_name().is_some_and(|name| name != LATEST)
}
