//! Unified error types for the application.

use crate::services::clipboard_service::ClipboardError;

/// Failure of the remote background-removal call.
#[derive(Debug, thiserror::Error)]
pub enum RemovalError {
    /// The request could not be completed.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The service answered with a non-success status.
    #[error("service responded with status {0}")]
    Status(u16),
    /// The service answered with an empty body.
    #[error("service returned an empty image")]
    EmptyBody,
}

/// A screen transition that is not allowed from the current state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// A removal request is already in flight.
    #[error("an image is already being processed")]
    Busy,
    /// A new file can only be selected from the idle screen.
    #[error("reset the current result before selecting another image")]
    NotIdle,
    /// The operation needs a completed result.
    #[error("no processed image is available")]
    NotComplete,
    /// The request was superseded by a reset or teardown.
    #[error("the processing request is no longer current")]
    Stale,
}

/// Failure of a download or share action.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    NotReady(#[from] TransitionError),
    #[error("file system error: {0}")]
    Io(#[from] std::io::Error),
    #[error("clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),
    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),
}

/// Invalid configuration value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid endpoint URL {0}")]
    InvalidEndpoint(String),
    #[error("unknown share mode {0:?} (expected \"image\" or \"link\")")]
    InvalidShareMode(String),
    #[error("invalid toast duration {0:?}")]
    InvalidDuration(String),
}
