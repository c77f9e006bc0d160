//! The interval entity: one timed work or break period.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Pomodoro,
    ShortBreak,
    LongBreak,
}

impl Category {
    /// Stable string form used by storage backends.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Pomodoro => "pomodoro",
            Category::ShortBreak => "short_break",
            Category::LongBreak => "long_break",
        }
    }

    /// Inverse of [`as_str`](Self::as_str). `None` for unknown strings,
    /// which storage backends report as corruption.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pomodoro" => Some(Category::Pomodoro),
            "short_break" => Some(Category::ShortBreak),
            "long_break" => Some(Category::LongBreak),
            _ => None,
        }
    }

    /// Whether this interval counts as focus work rather than rest.
    pub fn is_focus(self) -> bool {
        matches!(self, Category::Pomodoro)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Pomodoro => "Pomodoro",
            Category::ShortBreak => "Short break",
            Category::LongBreak => "Long break",
        };
        f.write_str(s)
    }
}

/// Lifecycle state of an interval.
///
/// ```text
/// NotStarted -> Running -> (Paused | Done | Cancelled)
/// Paused -> Running            (resume, actual duration preserved)
/// ```
///
/// `Done` and `Cancelled` are terminal; a record in either state is never
/// mutated again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalState {
    NotStarted,
    Running,
    Paused,
    Done,
    Cancelled,
}

impl IntervalState {
    /// Stable string form used by storage backends.
    pub fn as_str(self) -> &'static str {
        match self {
            IntervalState::NotStarted => "not_started",
            IntervalState::Running => "running",
            IntervalState::Paused => "paused",
            IntervalState::Done => "done",
            IntervalState::Cancelled => "cancelled",
        }
    }

    /// Inverse of [`as_str`](Self::as_str).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "not_started" => Some(IntervalState::NotStarted),
            "running" => Some(IntervalState::Running),
            "paused" => Some(IntervalState::Paused),
            "done" => Some(IntervalState::Done),
            "cancelled" => Some(IntervalState::Cancelled),
            _ => None,
        }
    }

    /// `Done` or `Cancelled`.
    pub fn is_terminal(self) -> bool {
        matches!(self, IntervalState::Done | IntervalState::Cancelled)
    }

    /// A state the driver may pick up: `NotStarted` or `Paused`.
    pub fn is_resumable(self) -> bool {
        matches!(self, IntervalState::NotStarted | IntervalState::Paused)
    }
}

impl fmt::Display for IntervalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IntervalState::NotStarted => "not started",
            IntervalState::Running => "running",
            IntervalState::Paused => "paused",
            IntervalState::Done => "done",
            IntervalState::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// One timed period tracked by the engine.
///
/// Records are owned by the repository; every actor reads and writes
/// through it, and a local copy is only a snapshot. `actual` never
/// exceeds `planned`, and the two are equal exactly when the interval is
/// `Done`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interval {
    /// Repository-assigned identity; 0 until the record is created.
    pub id: i64,
    pub category: Category,
    pub state: IntervalState,
    /// Fixed target duration, set at creation from configuration.
    pub planned: Duration,
    /// Elapsed progress; advances only while `Running`.
    pub actual: Duration,
    /// Wall clock of the first `NotStarted -> Running` transition.
    pub started_at: Option<DateTime<Utc>>,
    /// Wall clock of the terminal transition.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Interval {
    /// A fresh, unpersisted interval with no progress.
    pub fn new(category: Category, planned: Duration) -> Self {
        Self {
            id: 0,
            category,
            state: IntervalState::NotStarted,
            planned,
            actual: Duration::ZERO,
            started_at: None,
            completed_at: None,
        }
    }

    /// Time left before the interval would complete.
    pub fn remaining(&self) -> Duration {
        self.planned.saturating_sub(self.actual)
    }
}
