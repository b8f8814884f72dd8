//! Input-file locator
//!
//! Build runs leave several project and result files behind; the pipeline
//! always wants the newest one of each. A flat directory listing is enough,
//! no recursive walking.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::message::Error;

/// Newest `*.csproj` file in the directory, by modification time.
pub fn newest_project_file(dir: &Path) -> Result<PathBuf, Error> {
    newest_with_extension(dir, "csproj").ok_or_else(|| Error::NoProjectFileFound {
        dir: dir.to_path_buf(),
    })
}

/// Newest `*.trx` file in the directory, by modification time.
pub fn newest_result_file(dir: &Path) -> Result<PathBuf, Error> {
    newest_with_extension(dir, "trx").ok_or_else(|| Error::NoResultFileFound {
        dir: dir.to_path_buf(),
    })
}

fn newest_with_extension(dir: &Path, extension: &str) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    entries
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            let matches = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
            if !matches || !path.is_file() {
                return None;
            }
            let modified = entry
                .metadata()
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            Some((modified, path))
        })
        .max_by_key(|(modified, _)| *modified)
        .map(|(_, path)| path)
}
