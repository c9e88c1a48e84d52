//! Error types for scriptsync-sync.

use std::path::PathBuf;

use thiserror::Error;

use scriptsync_core::ScanError;

/// All errors that can arise from sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Discovery, version extraction, resolution or configuration failed.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Reading the latest copy or overwriting an outdated one failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    /// Stable error category, shared with [`ScanError::kind`].
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Scan(err) => err.kind(),
            Self::Io { .. } => "IoError",
        }
    }
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
