//! Errors raised while preparing or inspecting test fixtures.
//!
//! These never escape the public assertion surface directly: helpers turn them
//! into [`Failure`](crate::report::Failure)s on the caller's sink.

use std::path::PathBuf;

use thiserror::Error;

/// Helper-level errors.
#[derive(Debug, Error)]
pub enum HelperError {
    /// The temporary file could not be created.
    #[error("could not create temp file: {0}")]
    CreateTempFile(#[source] std::io::Error),
    /// The initial content could not be written.
    #[error("could not write temp file: {0}")]
    WriteTempFile(#[source] std::io::Error),
    /// The temporary file could not be removed on release.
    #[error("could not remove temp file {}: {source}", path.display())]
    RemoveTempFile {
        /// Path of the file that was left behind.
        path: PathBuf,
        /// Underlying removal failure.
        #[source]
        source: std::io::Error,
    },
    /// A value could not be lowered for structural comparison.
    #[error("could not serialize value for structural comparison: {0}")]
    Serialize(#[from] serde_json::Error),
    /// The message source has no further messages.
    #[error("message stream closed")]
    StreamClosed,
    /// The background thread for bounded work could not be started.
    #[error("could not spawn work thread: {0}")]
    SpawnWork(#[source] std::io::Error),
}
