//! Version marker extraction.
//!
//! A candidate's version is the first line of the form
//!
//! ```text
//! # 2023-06-15 09:30
//! ```
//!
//! anchored at the start of the line. Anything after the minute field is
//! ignored. Later marker lines never override the first one.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{io_err, ScanError};
use crate::types::Version;

fn marker_regex() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| {
        Regex::new(r"^# ([0-9]{4})-([0-9]{2})-([0-9]{2}) ([0-9]{2}):([0-9]{2})")
            .expect("version marker regex is valid")
    })
}

/// Result of matching one line against the version marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    /// The line is not a version marker.
    Absent,
    /// The line is a marker naming a real calendar time.
    Valid(Version),
    /// The line has marker shape but an impossible date or time.
    Invalid(String),
}

/// Match a single line against the version marker pattern.
pub fn match_marker(line: &str) -> Marker {
    let Some(caps) = marker_regex().captures(line) else {
        return Marker::Absent;
    };
    // Every group is exactly 2 or 4 ASCII digits, so these parses cannot fail.
    let field = |i: usize| caps[i].parse::<u32>().unwrap_or(u32::MAX);
    let year = caps[1].parse::<i32>().unwrap_or(i32::MAX);

    match Version::from_parts(year, field(2), field(3), field(4), field(5)) {
        Some(version) => Marker::Valid(version),
        None => Marker::Invalid(caps[0].to_string()),
    }
}

/// Scan `path` line by line and return the version from the first marker.
///
/// Returns `Ok(None)` when no line matches. A marker with out-of-range
/// fields is [`ScanError::InvalidVersion`], not an absent version.
pub fn read_version(path: &Path) -> Result<Option<Version>, ScanError> {
    let file = File::open(path).map_err(|e| io_err(path, e))?;
    let reader = BufReader::new(file);

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| io_err(path, e))?;
        match match_marker(&line) {
            Marker::Absent => continue,
            Marker::Valid(version) => {
                tracing::debug!("{}: version {version}", path.display());
                return Ok(Some(version));
            }
            Marker::Invalid(text) => {
                return Err(ScanError::InvalidVersion {
                    path: path.to_path_buf(),
                    line: index + 1,
                    text,
                });
            }
        }
    }

    tracing::debug!("{}: no version marker", path.display());
    Ok(None)
}
