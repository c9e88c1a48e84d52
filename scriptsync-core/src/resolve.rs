//! Version resolution: choose the latest candidate.
//!
//! Selection is a single fold over the candidates in input order:
//!
//! 1. The first candidate becomes the provisional best, dated or not.
//! 2. A dated candidate strictly newer than the best (any date beats an
//!    undated best) replaces it. Ties recorded against the old best are
//!    released back into the outdated set.
//! 3. A dated candidate equal to the best is recorded as a tie. The earlier
//!    candidate stays best.
//! 4. Everything else is outdated. Two undated files never compete: the
//!    first one keeps its place.
//!
//! Ties with the final best are neither latest nor outdated.
//!
//! Ties are judged against the *final* latest version, never against a best
//! that was later superseded. For `[v1, v1, v2]` both v1 copies are outdated,
//! where a tie list that is only ever appended to would silently drop the
//! second one. This policy keeps a single `--update` run sufficient: after
//! it, every copy carries the latest version and nothing is reported again.

use std::path::PathBuf;

use crate::error::ScanError;
use crate::types::{Candidate, Selection};
use crate::version::read_version;

/// Pick the latest candidate from an already-versioned set.
///
/// Returns [`ScanError::NoLatest`] for an empty set. Output vectors keep
/// the input order.
pub fn select(candidates: Vec<Candidate>) -> Result<Selection, ScanError> {
    if candidates.is_empty() {
        return Err(ScanError::NoLatest);
    }

    let mut best = 0;
    let mut ties: Vec<usize> = Vec::new();
    for (index, candidate) in candidates.iter().enumerate().skip(1) {
        let best_version = candidates[best].version;
        match (candidate.version, best_version) {
            (Some(version), Some(current)) if version == current => ties.push(index),
            (Some(version), current) if current.map_or(true, |c| version > c) => {
                best = index;
                // Copies tied with the superseded best are behind now.
                ties.clear();
            }
            _ => {}
        }
    }

    let mut latest = None;
    let mut outdated = Vec::new();
    let mut current = Vec::new();
    for (index, candidate) in candidates.into_iter().enumerate() {
        if index == best {
            latest = Some(candidate);
        } else if ties.contains(&index) {
            current.push(candidate);
        } else {
            outdated.push(candidate);
        }
    }

    Ok(Selection {
        latest: latest.ok_or(ScanError::NoLatest)?,
        outdated,
        current,
    })
}

/// Read the version of every path, in order, then [`select`].
///
/// The first unreadable file or invalid marker aborts resolution.
pub fn resolve(paths: Vec<PathBuf>) -> Result<Selection, ScanError> {
    let mut candidates = Vec::with_capacity(paths.len());
    for path in paths {
        let version = read_version(&path)?;
        candidates.push(Candidate { path, version });
    }
    select(candidates)
}
