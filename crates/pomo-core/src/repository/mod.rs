//! Durable storage abstraction for interval records.
//!
//! The repository is the single owner of record state: the driver and the
//! pause controller never share a live interval object, they both read
//! and write through an implementation of [`IntervalRepository`]. Any
//! conformant backend is interchangeable; two ship with the crate.

pub mod memory;
pub mod sqlite;

use std::path::PathBuf;

use crate::error::RepositoryError;
use crate::interval::{Interval, IntervalState};

/// Storage contract for interval records.
///
/// Implementations must make every operation atomic from a reader's
/// perspective: no caller ever observes a record whose progress and state
/// belong to different writes. Returned records are immutable snapshots;
/// mutating a local copy changes nothing until a subsequent `update`.
///
/// History is append-only. Completed and cancelled intervals are kept for
/// sequencing and reporting; nothing is ever deleted.
pub trait IntervalRepository: Send + Sync {
    /// Persist a new record, assigning its id. The stored copy is
    /// returned; the caller's `NotStarted` template is untouched.
    fn create(&self, interval: Interval) -> Result<Interval, RepositoryError>;

    /// Persist mutated fields for an existing id.
    ///
    /// # Errors
    /// [`RepositoryError::NotFound`] if the id is absent.
    fn update(&self, interval: &Interval) -> Result<(), RepositoryError>;

    /// Compare-and-set: persist `interval` only if the stored state still
    /// equals `expected`, atomically. Returns whether the write happened.
    ///
    /// This is the serialization primitive that lets the driver's tick
    /// writes and an external pause target the same id without ever
    /// producing a corrupted in-between record.
    fn update_if_state(
        &self,
        interval: &Interval,
        expected: IntervalState,
    ) -> Result<bool, RepositoryError>;

    /// Snapshot of one record.
    fn by_id(&self, id: i64) -> Result<Interval, RepositoryError>;

    /// The most recently created record.
    ///
    /// # Errors
    /// [`RepositoryError::NoIntervals`] if history is empty.
    fn last(&self) -> Result<Interval, RepositoryError>;

    /// All records, newest first.
    fn history(&self) -> Result<Vec<Interval>, RepositoryError>;
}

/// Returns `~/.config/pomo[-dev]/`, creating it if needed.
///
/// Set `POMO_ENV=dev` to use a separate development data directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("POMO_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("pomo-dev")
    } else {
        base_dir.join("pomo")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
