//! scriptsync core library — domain types, configuration, discovery and
//! version resolution.
//!
//! - [`types`] — [`Version`], [`Candidate`], [`Selection`]
//! - [`config`] — [`SyncConfig`] and its loaders
//! - [`discovery`] — find one copy of the target file per subdirectory
//! - [`version`] — extract the `# YYYY-MM-DD HH:MM` marker from a file
//! - [`resolve`] — pick the latest copy and the outdated remainder
//! - [`error`] — [`ScanError`]

pub mod config;
pub mod discovery;
pub mod error;
pub mod resolve;
pub mod types;
pub mod version;

pub use config::{ConfigOverrides, SyncConfig};
pub use error::ScanError;
pub use types::{Candidate, Selection, Version};
