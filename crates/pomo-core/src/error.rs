//! Error types for pomo-core.
//!
//! Two layers, matching the two halves of the crate: `RepositoryError`
//! for the storage contract, `EngineError` for the selector, driver, and
//! pause controller. Repository errors propagate through `EngineError`
//! unwrapped.

use thiserror::Error;

/// Errors produced by an [`IntervalRepository`](crate::IntervalRepository)
/// implementation.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Lookup miss for a given interval id.
    #[error("interval {0} not found")]
    NotFound(i64),

    /// History is empty; there is no last interval.
    #[error("no intervals recorded")]
    NoIntervals,

    /// A persisted record could not be decoded. This is the only
    /// condition callers treat as fatal.
    #[error("corrupt interval record: {0}")]
    Corrupt(String),

    /// Underlying SQLite failure.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Filesystem failure while locating or creating the data directory.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors produced by the engine entry points.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A configured duration or count is zero.
    #[error("invalid configuration: {field} must be positive")]
    InvalidConfig { field: &'static str },

    /// Pause was requested on an interval that is not running. Expected,
    /// recoverable; callers treat it as a no-op.
    #[error("interval is not running")]
    IntervalNotRunning,

    /// The driver was invoked on a `Done` or `Cancelled` interval.
    #[error("interval is already completed")]
    IntervalCompleted,

    /// The driver was invoked on an interval that is already running,
    /// or lost the race to claim it.
    #[error("interval is already running")]
    AlreadyRunning,

    /// The driver loop observed its cancellation token. The interval is
    /// persisted as [`IntervalState::Cancelled`].
    #[error("interval cancelled")]
    Cancelled,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
