//! Helpers shared across CLI commands.

use std::sync::Arc;
use std::time::Duration;

use pomo_core::{Config, Interval, SqliteRepository};

use crate::settings::Settings;

/// Settings file + default SQLite repository, assembled into an engine
/// config.
pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    let repo = Arc::new(SqliteRepository::open_default()?);
    Ok(Settings::load()?.into_config(repo))
}

/// `mm:ss`, or `h:mm:ss` once an hour is involved.
pub fn fmt_duration(d: Duration) -> String {
    let total = d.as_secs();
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}

/// One-line human rendering of an interval record.
pub fn describe(interval: &Interval) -> String {
    let when = interval
        .started_at
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "never started".to_string());
    format!(
        "#{} {} [{}] {} / {} ({})",
        interval.id,
        interval.category,
        interval.state,
        fmt_duration(interval.actual),
        fmt_duration(interval.planned),
        when,
    )
}
