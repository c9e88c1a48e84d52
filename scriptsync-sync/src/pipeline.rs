//! Shared pipeline entrypoint: discover → resolve → synchronize.

use std::path::PathBuf;

use serde::Serialize;

use scriptsync_core::{discovery, resolve, Candidate, Selection, SyncConfig, Version};

use crate::{synchronize, SyncError, WriteResult};

/// What to do with outdated copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// List outdated copies only.
    #[default]
    Report,
    /// Overwrite outdated copies with the latest one.
    Update,
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub base_path: PathBuf,
    pub mode: SyncMode,
    pub latest: PathBuf,
    pub latest_version: Option<Version>,
    /// One entry per outdated copy, in discovery order.
    pub results: Vec<WriteResult>,
    /// Copies already at the latest version.
    pub current: Vec<PathBuf>,
}

/// Step reached during [`run_with`], delivered while the run is in flight.
#[derive(Debug, Clone, Copy)]
pub enum Progress<'a> {
    /// Resolution finished; no copy has been touched yet.
    Resolved {
        selection: &'a Selection,
        mode: SyncMode,
    },
    /// One outdated copy was reported or written.
    Result(&'a WriteResult),
}

/// Run the full pipeline for `config`.
pub fn run(config: &SyncConfig, mode: SyncMode) -> Result<SyncReport, SyncError> {
    run_with(config, mode, |_| {})
}

/// [`run`], calling `on_progress` as each step completes.
///
/// If a write fails, every `Progress::Result` already delivered names a copy
/// that was really written.
pub fn run_with(
    config: &SyncConfig,
    mode: SyncMode,
    mut on_progress: impl FnMut(Progress<'_>),
) -> Result<SyncReport, SyncError> {
    let paths = discovery::find_candidates(config)?;
    tracing::debug!(
        "found {} cop(ies) of {} under {}",
        paths.len(),
        config.target_name,
        config.base_path.display()
    );

    let selection = resolve::resolve(paths)?;
    on_progress(Progress::Resolved {
        selection: &selection,
        mode,
    });
    let results = synchronize(&selection, mode, |result| {
        on_progress(Progress::Result(result))
    })?;

    Ok(SyncReport {
        base_path: config.base_path.clone(),
        mode,
        latest: selection.latest.path,
        latest_version: selection.latest.version,
        results,
        current: selection.current.into_iter().map(|c: Candidate| c.path).collect(),
    })
}
