//! End-to-end engine scenarios, run against both storage backends.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use pomo_core::{
    driver, next_interval, pause, CancelToken, Category, Config, EngineError, InMemoryRepository,
    Interval, IntervalRepository, IntervalState, SqliteRepository,
};

const TICK: Duration = Duration::from_millis(10);

fn backends() -> Vec<(&'static str, Arc<dyn IntervalRepository>)> {
    vec![
        ("memory", Arc::new(InMemoryRepository::new())),
        ("sqlite", Arc::new(SqliteRepository::open_memory().unwrap())),
    ]
}

fn config(repo: Arc<dyn IntervalRepository>) -> Config {
    let mut c = Config::new(repo);
    c.pomodoro_duration = TICK * 3;
    c.short_break_duration = TICK;
    c.long_break_duration = TICK * 2;
    c.tick = TICK;
    c
}

fn noop(_: &Interval) {}

/// Scenario A: drive interval #1 to completion with no-op callbacks.
#[tokio::test(start_paused = true)]
async fn scenario_a_drive_to_done() {
    for (name, repo) in backends() {
        let config = config(repo);
        let interval = next_interval(&config).unwrap();
        assert_eq!(interval.id, 1, "{name}");
        assert_eq!(interval.category, Category::Pomodoro, "{name}");
        assert_eq!(interval.planned, TICK * 3, "{name}");

        driver::start(CancelToken::new(), &config, interval, noop, noop, noop)
            .await
            .unwrap();

        let stored = config.repo().by_id(1).unwrap();
        assert_eq!(stored.state, IntervalState::Done, "{name}");
        assert_eq!(stored.actual, TICK * 3, "{name}");
    }
}

/// Scenario B: pause from outside after exactly one tick, then a second
/// pause is rejected.
#[tokio::test(start_paused = true)]
async fn scenario_b_external_pause_after_one_tick() {
    for (name, repo) in backends() {
        let config = config(repo);
        let interval = next_interval(&config).unwrap();
        let id = interval.id;

        let driver_config = config.clone();
        let handle = tokio::spawn(async move {
            driver::start(CancelToken::new(), &driver_config, interval, noop, noop, noop).await
        });

        tokio::time::sleep(TICK + TICK / 2).await;
        pause(&config, id).unwrap();
        handle.await.unwrap().unwrap();

        let stored = config.repo().by_id(id).unwrap();
        assert_eq!(stored.state, IntervalState::Paused, "{name}");
        assert_eq!(stored.actual, TICK, "{name}");

        assert!(
            matches!(pause(&config, id), Err(EngineError::IntervalNotRunning)),
            "{name}"
        );
    }
}

/// Scenario C: pausing a freshly created interval is rejected without
/// mutation.
#[test]
fn scenario_c_pause_not_started() {
    for (name, repo) in backends() {
        let config = config(repo);
        let interval = next_interval(&config).unwrap();
        assert!(
            matches!(pause(&config, interval.id), Err(EngineError::IntervalNotRunning)),
            "{name}"
        );
        let stored = config.repo().by_id(interval.id).unwrap();
        assert_eq!(stored.state, IntervalState::NotStarted, "{name}");
        assert_eq!(stored.actual, Duration::ZERO, "{name}");
    }
}

/// Sixteen selector+complete cycles walk the eight-slot category table
/// twice, with the long break every fourth completed pomodoro.
#[tokio::test(start_paused = true)]
async fn sixteen_cycles_sequence() {
    let expected = [
        (Category::Pomodoro, TICK * 3),
        (Category::ShortBreak, TICK),
        (Category::Pomodoro, TICK * 3),
        (Category::ShortBreak, TICK),
        (Category::Pomodoro, TICK * 3),
        (Category::ShortBreak, TICK),
        (Category::Pomodoro, TICK * 3),
        (Category::LongBreak, TICK * 2),
    ];
    for (name, repo) in backends() {
        let config = config(repo);
        for position in 1..=16 {
            let (category, planned) = expected[(position - 1) % 8];
            let interval = next_interval(&config).unwrap();
            assert_eq!(interval.category, category, "{name}, position {position}");
            assert_eq!(interval.planned, planned, "{name}, position {position}");
            assert_eq!(interval.state, IntervalState::NotStarted, "{name}");

            let id = interval.id;
            driver::start(CancelToken::new(), &config, interval, noop, noop, noop)
                .await
                .unwrap();
            assert_eq!(
                config.repo().by_id(id).unwrap().state,
                IntervalState::Done,
                "{name}, position {position}"
            );
        }
    }
}

/// Pause, resume through the selector, and finish; progress accumulates
/// across the suspension boundary.
#[tokio::test(start_paused = true)]
async fn pause_resume_finish() {
    for (name, repo) in backends() {
        let config = config(repo);
        let interval = next_interval(&config).unwrap();
        let id = interval.id;

        let pause_config = config.clone();
        driver::start(
            CancelToken::new(),
            &config,
            interval,
            noop,
            |i| {
                if i.actual == TICK {
                    pause(&pause_config, i.id).unwrap();
                }
            },
            |_| panic!("paused interval must not reach on_end"),
        )
        .await
        .unwrap();

        let resumed = next_interval(&config).unwrap();
        assert_eq!(resumed.id, id, "{name}");
        assert_eq!(resumed.state, IntervalState::Paused, "{name}");
        assert_eq!(resumed.actual, TICK, "{name}");

        let resumed_ticks = AtomicUsize::new(0);
        driver::start(
            CancelToken::new(),
            &config,
            resumed,
            noop,
            |_| {
                resumed_ticks.fetch_add(1, Ordering::SeqCst);
            },
            noop,
        )
        .await
        .unwrap();

        assert_eq!(resumed_ticks.load(Ordering::SeqCst), 2, "{name}");
        let stored = config.repo().by_id(id).unwrap();
        assert_eq!(stored.state, IntervalState::Done, "{name}");
        assert_eq!(stored.actual, stored.planned, "{name}");
    }
}

/// Cancellation persists `Cancelled`, freezes the duration, and the next
/// selection starts a fresh pomodoro that does not reuse the record.
#[tokio::test(start_paused = true)]
async fn cancel_then_reselect() {
    for (name, repo) in backends() {
        let config = config(repo);
        let interval = next_interval(&config).unwrap();
        let id = interval.id;

        let cancel = CancelToken::new();
        let canceller = cancel.clone();
        let result = driver::start(
            cancel,
            &config,
            interval,
            noop,
            |i| {
                if i.actual == TICK {
                    canceller.cancel();
                }
            },
            noop,
        )
        .await;
        assert!(matches!(result, Err(EngineError::Cancelled)), "{name}");

        let stored = config.repo().by_id(id).unwrap();
        assert_eq!(stored.state, IntervalState::Cancelled, "{name}");
        assert_eq!(stored.actual, TICK, "{name}");

        // Cancelled history stays visible but does not block selection.
        let next = next_interval(&config).unwrap();
        assert_ne!(next.id, id, "{name}");
        assert_eq!(next.category, Category::Pomodoro, "{name}");
        assert_eq!(config.repo().history().unwrap().len(), 2, "{name}");
    }
}
