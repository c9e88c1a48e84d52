//! Error types for scriptsync-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while locating and versioning candidate files.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Underlying I/O failure, with the path that triggered it.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line matched the version marker but is not a real calendar time.
    #[error("invalid version marker in {path} line {line}: '{text}'")]
    InvalidVersion {
        path: PathBuf,
        line: usize,
        text: String,
    },

    /// The candidate set was empty.
    #[error("unable to determine latest file")]
    NoLatest,

    /// The config file exists but is not valid YAML for [`crate::SyncConfig`].
    #[error("failed to parse config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ScanError {
    /// Stable, human-readable error category printed by the CLI.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Io { .. } => "IoError",
            Self::InvalidVersion { .. } => "InvalidVersion",
            Self::NoLatest => "NoLatestFile",
            Self::ConfigParse { .. } | Self::InvalidConfig(_) => "ConfigError",
        }
    }
}

/// Convenience constructor for [`ScanError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ScanError {
    ScanError::Io {
        path: path.into(),
        source,
    }
}
