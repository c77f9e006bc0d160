//! `pomo pause` -- pause the running interval from another process.

use pomo_core::{pause, EngineError, IntervalRepository, RepositoryError};

use crate::common::{describe, load_config};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;

    let last = match config.repo().last() {
        Ok(last) => last,
        Err(RepositoryError::NoIntervals) => {
            println!("nothing to pause");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    match pause(&config, last.id) {
        Ok(()) => {
            println!("paused: {}", describe(&config.repo().by_id(last.id)?));
            Ok(())
        }
        // A rejected pause is an expected outcome, not a failure.
        Err(EngineError::IntervalNotRunning) => {
            println!("nothing running to pause (last interval is {})", last.state);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
