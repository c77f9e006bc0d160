//! TOML settings file for the CLI.
//!
//! Stored at `~/.config/pomo/config.toml`. Every field has a serde
//! default, so a partial file (or none at all) still yields a working
//! schedule.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use pomo_core::{data_dir, Config, IntervalRepository};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Focus period length in minutes.
    #[serde(default = "default_pomodoro_min")]
    pub pomodoro_min: u64,
    /// Short break length in minutes.
    #[serde(default = "default_short_break_min")]
    pub short_break_min: u64,
    /// Long break length in minutes.
    #[serde(default = "default_long_break_min")]
    pub long_break_min: u64,
    /// Completed pomodoros before a long break.
    #[serde(default = "default_long_break_interval")]
    pub long_break_interval: u32,
}

fn default_pomodoro_min() -> u64 {
    25
}
fn default_short_break_min() -> u64 {
    5
}
fn default_long_break_min() -> u64 {
    15
}
fn default_long_break_interval() -> u32 {
    4
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pomodoro_min: default_pomodoro_min(),
            short_break_min: default_short_break_min(),
            long_break_min: default_long_break_min(),
            long_break_interval: default_long_break_interval(),
        }
    }
}

impl Settings {
    pub fn path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load settings, falling back to defaults when the file is missing.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Build an engine config over `repo` from these settings.
    pub fn into_config(self, repo: Arc<dyn IntervalRepository>) -> Config {
        let mut config = Config::new(repo);
        config.pomodoro_duration = Duration::from_secs(self.pomodoro_min * 60);
        config.short_break_duration = Duration::from_secs(self.short_break_min * 60);
        config.long_break_duration = Duration::from_secs(self.long_break_min * 60);
        config.long_break_interval = self.long_break_interval;
        config
    }
}
