//! `pomo status` -- show the most recent interval.

use pomo_core::{IntervalRepository, RepositoryError};

use crate::common::{describe, load_config};

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    match config.repo().last() {
        Ok(last) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&last)?);
            } else {
                println!("{}", describe(&last));
            }
            Ok(())
        }
        Err(RepositoryError::NoIntervals) => {
            println!("no intervals yet");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
