//! In-memory repository backend.
//!
//! Zero-setup storage used by tests and throwaway sessions. A single
//! mutex over the record list makes each operation atomic, which is all
//! the contract asks for.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::RepositoryError;
use crate::interval::{Interval, IntervalState};
use crate::repository::IntervalRepository;

/// Interval storage backed by a plain `Vec`.
///
/// Ids are 1-based positions in creation order, matching the autoincrement
/// behavior of the SQLite backend.
#[derive(Default)]
pub struct InMemoryRepository {
    intervals: Mutex<Vec<Interval>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn intervals(&self) -> MutexGuard<'_, Vec<Interval>> {
        // A poisoned lock only means another thread panicked mid-access;
        // the data itself is still a consistent Vec.
        self.intervals.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl IntervalRepository for InMemoryRepository {
    fn create(&self, interval: Interval) -> Result<Interval, RepositoryError> {
        let mut intervals = self.intervals();
        let mut stored = interval;
        stored.id = intervals.len() as i64 + 1;
        intervals.push(stored.clone());
        Ok(stored)
    }

    fn update(&self, interval: &Interval) -> Result<(), RepositoryError> {
        let mut intervals = self.intervals();
        let slot = slot_mut(&mut intervals, interval.id)?;
        *slot = interval.clone();
        Ok(())
    }

    fn update_if_state(
        &self,
        interval: &Interval,
        expected: IntervalState,
    ) -> Result<bool, RepositoryError> {
        let mut intervals = self.intervals();
        let slot = slot_mut(&mut intervals, interval.id)?;
        if slot.state != expected {
            return Ok(false);
        }
        *slot = interval.clone();
        Ok(true)
    }

    fn by_id(&self, id: i64) -> Result<Interval, RepositoryError> {
        let mut intervals = self.intervals();
        slot_mut(&mut intervals, id).map(|i| i.clone())
    }

    fn last(&self) -> Result<Interval, RepositoryError> {
        self.intervals()
            .last()
            .cloned()
            .ok_or(RepositoryError::NoIntervals)
    }

    fn history(&self) -> Result<Vec<Interval>, RepositoryError> {
        Ok(self.intervals().iter().rev().cloned().collect())
    }
}

fn slot_mut(intervals: &mut [Interval], id: i64) -> Result<&mut Interval, RepositoryError> {
    if id < 1 || id as usize > intervals.len() {
        return Err(RepositoryError::NotFound(id));
    }
    Ok(&mut intervals[id as usize - 1])
}
