//! Candidate discovery.
//!
//! # Layout
//!
//! ```text
//! <base>/
//!   service_a/docker_utils.sh   <- candidate
//!   service_b/docker_utils.sh   <- candidate
//!   service_c/                  <- no target file, skipped
//!   notes.txt                   <- not a directory, skipped
//! ```
//!
//! Only immediate subdirectories are inspected. The returned paths are sorted
//! so that "first encountered" tie-breaking during resolution does not depend
//! on the platform's directory listing order.

use std::path::{Path, PathBuf};

use crate::config::SyncConfig;
use crate::error::{io_err, ScanError};

/// List `<base>/<subdir>/<target_name>` for every subdirectory that has it.
///
/// An empty result is valid; a missing or unreadable `base` is
/// [`ScanError::Io`].
pub fn find_candidates_at(base: &Path, target_name: &str) -> Result<Vec<PathBuf>, ScanError> {
    let mut found = Vec::new();
    for entry in std::fs::read_dir(base).map_err(|e| io_err(base, e))? {
        let entry = entry.map_err(|e| io_err(base, e))?;
        let dir = entry.path();
        if !dir.is_dir() {
            continue;
        }
        let file = dir.join(target_name);
        if file.is_file() {
            found.push(file);
        } else {
            tracing::debug!("skipping {}: no {target_name}", dir.display());
        }
    }
    found.sort();
    Ok(found)
}

/// [`find_candidates_at`] using the base path and target name from `config`.
pub fn find_candidates(config: &SyncConfig) -> Result<Vec<PathBuf>, ScanError> {
    find_candidates_at(&config.base_path, &config.target_name)
}
