//! Engine configuration: durations plus the repository handle.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::EngineError;
use crate::interval::Category;
use crate::repository::IntervalRepository;

/// Value object passed by reference into every core operation.
///
/// The repository handle is an `Arc`, so `Config` is cheap to clone and a
/// fire-and-forget driver task can own its own copy.
#[derive(Clone)]
pub struct Config {
    repo: Arc<dyn IntervalRepository>,
    pub pomodoro_duration: Duration,
    pub short_break_duration: Duration,
    pub long_break_duration: Duration,
    /// Completed pomodoros before a long break.
    pub long_break_interval: u32,
    /// Granularity of the driver's elapsed-time accounting.
    pub tick: Duration,
}

impl Config {
    pub const DEFAULT_POMODORO: Duration = Duration::from_secs(25 * 60);
    pub const DEFAULT_SHORT_BREAK: Duration = Duration::from_secs(5 * 60);
    pub const DEFAULT_LONG_BREAK: Duration = Duration::from_secs(15 * 60);
    pub const DEFAULT_LONG_BREAK_INTERVAL: u32 = 4;
    pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

    /// A config with the classic 25/5/15 schedule over the given repository.
    pub fn new(repo: Arc<dyn IntervalRepository>) -> Self {
        Self {
            repo,
            pomodoro_duration: Self::DEFAULT_POMODORO,
            short_break_duration: Self::DEFAULT_SHORT_BREAK,
            long_break_duration: Self::DEFAULT_LONG_BREAK,
            long_break_interval: Self::DEFAULT_LONG_BREAK_INTERVAL,
            tick: Self::DEFAULT_TICK,
        }
    }

    pub fn repo(&self) -> &dyn IntervalRepository {
        self.repo.as_ref()
    }

    /// The configured duration for one interval of `category`.
    pub fn duration_for(&self, category: Category) -> Duration {
        match category {
            Category::Pomodoro => self.pomodoro_duration,
            Category::ShortBreak => self.short_break_duration,
            Category::LongBreak => self.long_break_duration,
        }
    }

    /// Rejects zero durations and counts.
    ///
    /// # Errors
    /// [`EngineError::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.pomodoro_duration.is_zero() {
            return Err(EngineError::InvalidConfig { field: "pomodoro_duration" });
        }
        if self.short_break_duration.is_zero() {
            return Err(EngineError::InvalidConfig { field: "short_break_duration" });
        }
        if self.long_break_duration.is_zero() {
            return Err(EngineError::InvalidConfig { field: "long_break_duration" });
        }
        if self.long_break_interval == 0 {
            return Err(EngineError::InvalidConfig { field: "long_break_interval" });
        }
        if self.tick.is_zero() {
            return Err(EngineError::InvalidConfig { field: "tick" });
        }
        Ok(())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("pomodoro_duration", &self.pomodoro_duration)
            .field("short_break_duration", &self.short_break_duration)
            .field("long_break_duration", &self.long_break_duration)
            .field("long_break_interval", &self.long_break_interval)
            .field("tick", &self.tick)
            .finish_non_exhaustive()
    }
}
