//! Out-of-band pause of a running interval.

use crate::config::Config;
use crate::error::EngineError;
use crate::interval::IntervalState;
use crate::repository::IntervalRepository;

/// Transition the interval `id` from `Running` to `Paused`.
///
/// The current state is always re-read from the repository; a caller-held
/// snapshot may be stale. Safe to invoke while a driver is ticking the
/// same id: the write goes through the repository's compare-and-set, so
/// it either lands cleanly between tick writes or loses the race and is
/// rejected.
///
/// # Errors
/// [`EngineError::IntervalNotRunning`] if the interval is in any other
/// state (or finished just before the write). Nothing is mutated in that
/// case; callers treat this as a no-op, not a failure.
pub fn pause(config: &Config, id: i64) -> Result<(), EngineError> {
    let mut interval = config.repo().by_id(id)?;
    if interval.state != IntervalState::Running {
        return Err(EngineError::IntervalNotRunning);
    }

    interval.state = IntervalState::Paused;
    if !config
        .repo()
        .update_if_state(&interval, IntervalState::Running)?
    {
        return Err(EngineError::IntervalNotRunning);
    }
    tracing::debug!(id, "interval paused");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::repository::memory::InMemoryRepository;
    use crate::repository::IntervalRepository;
    use crate::selector::next_interval;

    fn config() -> Config {
        let mut c = Config::new(Arc::new(InMemoryRepository::new()));
        c.pomodoro_duration = Duration::from_millis(30);
        c.short_break_duration = Duration::from_millis(10);
        c.long_break_duration = Duration::from_millis(20);
        c.tick = Duration::from_millis(10);
        c
    }

    #[test]
    fn pause_requires_running() {
        let config = config();
        let fresh = next_interval(&config).unwrap();

        // Never started: rejected, record untouched.
        assert!(matches!(
            pause(&config, fresh.id),
            Err(EngineError::IntervalNotRunning)
        ));
        let stored = config.repo().by_id(fresh.id).unwrap();
        assert_eq!(stored.state, IntervalState::NotStarted);
        assert_eq!(stored.actual, Duration::ZERO);
    }

    #[test]
    fn pause_running_then_second_pause_rejected() {
        let config = config();
        let mut interval = next_interval(&config).unwrap();
        interval.state = IntervalState::Running;
        interval.actual = Duration::from_millis(10);
        config.repo().update(&interval).unwrap();

        pause(&config, interval.id).unwrap();
        let stored = config.repo().by_id(interval.id).unwrap();
        assert_eq!(stored.state, IntervalState::Paused);
        assert_eq!(stored.actual, Duration::from_millis(10));

        assert!(matches!(
            pause(&config, interval.id),
            Err(EngineError::IntervalNotRunning)
        ));
    }

    #[test]
    fn pause_unknown_id_propagates_not_found() {
        let config = config();
        assert!(matches!(
            pause(&config, 7),
            Err(EngineError::Repository(crate::RepositoryError::NotFound(7)))
        ));
    }

    #[test]
    fn pause_terminal_states_rejected() {
        let config = config();
        for terminal in [IntervalState::Done, IntervalState::Cancelled] {
            let mut interval = next_interval(&config).unwrap();
            interval.state = terminal;
            config.repo().update(&interval).unwrap();
            assert!(matches!(
                pause(&config, interval.id),
                Err(EngineError::IntervalNotRunning)
            ));
            assert_eq!(config.repo().by_id(interval.id).unwrap().state, terminal);
        }
    }
}
