//! # scriptsync-sync
//!
//! Propagate the latest copy of a script over its outdated siblings.
//!
//! Call [`pipeline::run`] to discover, resolve and then report or update in
//! one pass, or [`synchronize`] when a [`scriptsync_core::Selection`] is
//! already at hand.

pub mod error;
pub mod pipeline;
pub mod writer;

pub use error::SyncError;
pub use pipeline::{Progress, SyncMode, SyncReport};
pub use writer::{synchronize, WriteResult};
