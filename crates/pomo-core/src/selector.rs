//! Category-selection policy: what runs next.
//!
//! The selector is deterministic over stored history. Unfinished
//! intervals are handed back for resumption instead of being duplicated,
//! and cancelled intervals are invisible to the long-break counter --
//! incomplete work is not rewarded.

use crate::config::Config;
use crate::error::{EngineError, RepositoryError};
use crate::interval::{Category, Interval, IntervalState};
use crate::repository::IntervalRepository;

/// Decide and, if necessary, create the next interval.
///
/// - Empty history starts a fresh `Pomodoro`.
/// - A `NotStarted` or `Paused` last interval is returned unchanged, so
///   calling this twice without driving the result is idempotent.
/// - Otherwise categories alternate off the last completed interval:
///   after a pomodoro comes a break (long once `long_break_interval`
///   pomodoros completed since the previous long break), after a break
///   comes a pomodoro.
///
/// # Errors
/// [`EngineError::InvalidConfig`] for zero durations; repository errors
/// propagate unchanged.
pub fn next_interval(config: &Config) -> Result<Interval, EngineError> {
    config.validate()?;

    match config.repo().last() {
        Ok(last) if last.state.is_resumable() => {
            tracing::debug!(id = last.id, state = %last.state, "resuming unfinished interval");
            return Ok(last);
        }
        Ok(_) => {}
        Err(RepositoryError::NoIntervals) => {}
        Err(e) => return Err(e.into()),
    }

    let category = next_category(config)?;
    let interval = config
        .repo()
        .create(Interval::new(category, config.duration_for(category)))?;
    tracing::debug!(id = interval.id, category = %interval.category, "created next interval");
    Ok(interval)
}

/// Walk history newest-first over completed intervals only.
///
/// The pomodoro streak is counted up to the previous completed long
/// break; cancelled records are skipped entirely.
fn next_category(config: &Config) -> Result<Category, EngineError> {
    let history = config.repo().history()?;

    let mut last_done = None;
    let mut streak = 0u32;
    for record in history.iter().filter(|r| r.state == IntervalState::Done) {
        if last_done.is_none() {
            last_done = Some(record.category);
        }
        match record.category {
            Category::LongBreak => break,
            Category::Pomodoro => streak += 1,
            Category::ShortBreak => {}
        }
    }

    Ok(match last_done {
        // Nothing ever completed (history empty or all cancelled).
        None => Category::Pomodoro,
        Some(Category::ShortBreak) | Some(Category::LongBreak) => Category::Pomodoro,
        Some(Category::Pomodoro) => {
            if streak >= config.long_break_interval {
                Category::LongBreak
            } else {
                Category::ShortBreak
            }
        }
    })
}
