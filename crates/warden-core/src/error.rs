//! Error types for warden-core.

use thiserror::Error;

/// Result type for warden-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors of a room session.
///
/// Per-item failures (lookup errors, rejected affiliation changes,
/// malformed contact entries) never surface here; they are logged and
/// contained inside the worker loop. Only conditions that end the
/// session as a whole do.
#[derive(Debug, Error)]
pub enum Error {
    /// Joining or keeping the room session failed.
    #[error("room session error: {0}")]
    Room(#[from] crate::client::RoomError),

    /// The join-notification stream ended without a shutdown request.
    #[error("room session lost")]
    SessionLost,

    /// The worker task ended abnormally.
    #[error("affiliation worker aborted")]
    WorkerAborted,

    /// A configuration value could not be read.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors from environment-derived configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),

    /// A variable is set to a value that does not parse.
    #[error("invalid value for {var}: {value:?}: {message}")]
    InvalidVar {
        var: &'static str,
        value: String,
        message: String,
    },
}
