//! `pomo history` -- list stored intervals, newest first.

use pomo_core::IntervalRepository;

use crate::common::{describe, load_config};

pub fn run(limit: usize) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let history = config.repo().history()?;
    if history.is_empty() {
        println!("no intervals yet");
        return Ok(());
    }
    for interval in history.iter().take(limit) {
        println!("{}", describe(interval));
    }
    Ok(())
}
