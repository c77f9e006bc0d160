//! The real-time tick loop that advances one interval.
//!
//! The driver runs as its own unit of concurrent execution, typically
//! spawned fire-and-forget so the caller stays responsive. Per tick it
//! advances the stored record by one tick's worth of progress, then
//! checks the exit conditions in priority order: completion, cancellation,
//! external pause. Every callback fires strictly after the corresponding
//! persistence call has returned, so callbacks only ever observe durable
//! state.
//!
//! Pause is not a signal. It is a state mutation performed on the shared
//! repository record by [`pause`](crate::pause::pause), which the loop
//! notices either through its own re-read or through a failed
//! compare-and-set on the next tick write. Either way the progress
//! counter freezes at the last completed tick.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;

use crate::config::Config;
use crate::error::EngineError;
use crate::interval::{Interval, IntervalState};
use crate::repository::IntervalRepository;

/// Cooperative cancellation flag.
///
/// Cloned into whoever may want to cancel; the driver polls it once per
/// tick, never mid-write. Cancellation therefore takes effect only at a
/// tick boundary, after the in-flight persistence call has completed.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Drive `interval` until it completes, is cancelled, or is paused.
///
/// Precondition: the interval is `NotStarted` (first start, stamps
/// `started_at`) or `Paused` (resume, `actual` preserved). Anything else
/// fails without mutation: [`EngineError::AlreadyRunning`] for a running
/// interval, [`EngineError::IntervalCompleted`] for a terminal one.
///
/// Outcomes:
/// - completion: record persisted as `Done` with `actual == planned`,
///   `on_end` invoked, returns `Ok(())`
/// - cancellation: record persisted as `Cancelled` with `actual` frozen
///   at the last completed tick, `on_end` invoked, returns
///   [`EngineError::Cancelled`]
/// - external pause: loop exits with `Ok(())` *without* `on_end`
///
/// `Ok(())` therefore covers both completion and pause; callers that need
/// to tell them apart inspect the persisted state. Any repository failure
/// aborts the loop immediately, leaving the record at its last
/// successfully persisted state.
pub async fn start<S, T, E>(
    cancel: CancelToken,
    config: &Config,
    mut interval: Interval,
    on_start: S,
    mut on_tick: T,
    on_end: E,
) -> Result<(), EngineError>
where
    S: FnOnce(&Interval),
    T: FnMut(&Interval),
    E: FnOnce(&Interval),
{
    let prior = interval.state;
    match prior {
        IntervalState::NotStarted => interval.started_at = Some(Utc::now()),
        IntervalState::Paused => {}
        IntervalState::Running => return Err(EngineError::AlreadyRunning),
        IntervalState::Done | IntervalState::Cancelled => {
            return Err(EngineError::IntervalCompleted)
        }
    }

    interval.state = IntervalState::Running;
    // Claim the interval with a compare-and-set so two drivers can never
    // both own it.
    if !config.repo().update_if_state(&interval, prior)? {
        return Err(EngineError::AlreadyRunning);
    }
    tracing::debug!(id = interval.id, category = %interval.category, "interval running");
    on_start(&interval);

    loop {
        // The loop's only suspension point.
        tokio::time::sleep(config.tick).await;

        let step = config.tick.min(interval.remaining());
        interval.actual += step;
        if !config.repo().update_if_state(&interval, IntervalState::Running)? {
            // An external pause landed mid-sleep; nothing was persisted
            // and the stored progress stays at the last completed tick.
            tracing::debug!(id = interval.id, "tick write lost to pause");
            return Ok(());
        }
        on_tick(&interval);

        if interval.actual >= interval.planned {
            interval.state = IntervalState::Done;
            interval.completed_at = Some(Utc::now());
            config.repo().update(&interval)?;
            tracing::debug!(id = interval.id, "interval done");
            on_end(&interval);
            return Ok(());
        }

        if cancel.is_cancelled() {
            interval.state = IntervalState::Cancelled;
            interval.completed_at = Some(Utc::now());
            config.repo().update(&interval)?;
            tracing::debug!(id = interval.id, "interval cancelled");
            on_end(&interval);
            return Err(EngineError::Cancelled);
        }

        // A pause issued from within `on_tick` shows up here.
        if config.repo().by_id(interval.id)?.state == IntervalState::Paused {
            tracing::debug!(id = interval.id, "pause observed, loop exiting");
            return Ok(());
        }
    }
}
