//! `pomo run` -- drive intervals back to back until stopped.

use std::io::Write;

use clap::Args;

use pomo_core::{driver, next_interval, CancelToken, EngineError, IntervalRepository, IntervalState};

use crate::common::{describe, fmt_duration, load_config};

#[derive(Args)]
pub struct RunArgs {
    /// Stop after this many completed intervals (default: run until Ctrl-C)
    #[arg(long)]
    pub sessions: Option<u32>,
    /// Emit one JSON line per event instead of human output
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;

    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let mut completed = 0u32;
    loop {
        let interval = next_interval(&config)?;
        let id = interval.id;

        let json = args.json;
        let result = driver::start(
            cancel.clone(),
            &config,
            interval,
            |i| {
                if json {
                    print_event("started", i);
                } else {
                    println!("{} for {}", i.category, fmt_duration(i.remaining()));
                }
            },
            |i| {
                if json {
                    print_event("tick", i);
                } else {
                    print!("\r  {} remaining ", fmt_duration(i.remaining()));
                    let _ = std::io::stdout().flush();
                }
            },
            |i| {
                if json {
                    print_event("ended", i);
                } else {
                    println!();
                    match i.state {
                        IntervalState::Done => println!("{} complete", i.category),
                        IntervalState::Cancelled => println!("{} cancelled", i.category),
                        _ => {}
                    }
                }
            },
        )
        .await;

        match result {
            Ok(()) => {
                let stored = config.repo().by_id(id)?;
                if stored.state == IntervalState::Paused {
                    if !json {
                        println!();
                        println!("paused: {}", describe(&stored));
                    }
                    return Ok(());
                }
                completed += 1;
                if let Some(limit) = args.sessions {
                    if completed >= limit {
                        return Ok(());
                    }
                }
            }
            Err(EngineError::Cancelled) => return Ok(()),
            Err(e) => return Err(e.into()),
        }
    }
}

fn print_event(kind: &str, interval: &pomo_core::Interval) {
    match serde_json::to_string(&serde_json::json!({ "event": kind, "interval": interval })) {
        Ok(line) => println!("{line}"),
        Err(e) => tracing::warn!("failed to encode event: {e}"),
    }
}
