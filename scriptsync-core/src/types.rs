//! Domain types for candidate discovery and selection.
//!
//! All path fields use `PathBuf`; a [`Candidate`] is constructed fresh from
//! the filesystem on every run and never persisted.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

const VERSION_FORMAT: &str = "%Y-%m-%d %H:%M";

// ---------------------------------------------------------------------------
// Version
// ---------------------------------------------------------------------------

/// Minute-precision timestamp embedded in a script's leading comment.
///
/// Ordered chronologically. Displays and serializes as `YYYY-MM-DD HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(NaiveDateTime);

impl Version {
    /// Build a version from calendar fields; `None` if any field is out of range.
    pub fn from_parts(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .map(Self)
    }

    pub fn as_datetime(&self) -> NaiveDateTime {
        self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(VERSION_FORMAT))
    }
}

impl FromStr for Version {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDateTime::parse_from_str(s, VERSION_FORMAT).map(Self)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// Candidate / Selection
// ---------------------------------------------------------------------------

/// One discovered copy of the tracked script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub path: PathBuf,
    /// `None` when the file carries no version marker.
    pub version: Option<Version>,
}

impl Candidate {
    pub fn new(path: impl Into<PathBuf>, version: Option<Version>) -> Self {
        Self {
            path: path.into(),
            version,
        }
    }
}

/// Outcome of version resolution over a candidate set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// The copy every other copy should match.
    pub latest: Candidate,
    /// Copies behind `latest`, in candidate-set order.
    pub outdated: Vec<Candidate>,
    /// Copies whose version equals `latest`'s; neither latest nor outdated.
    pub current: Vec<Candidate>,
}
