//! SQLite repository backend.
//!
//! The durable backend shared by the CLI and any other front end. A
//! mutex around the connection plus single-statement writes give the
//! per-id atomicity the contract requires; the compare-and-set maps to
//! `UPDATE ... WHERE id = ? AND state = ?`.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::RepositoryError;
use crate::interval::{Category, Interval, IntervalState};
use crate::repository::{data_dir, IntervalRepository};

/// Interval storage in a SQLite database.
pub struct SqliteRepository {
    conn: Mutex<Connection>,
}

/// One row, still in its raw stored form.
type Row = (i64, String, String, i64, i64, Option<String>, Option<String>);

const SELECT_COLUMNS: &str =
    "id, category, state, planned_ms, actual_ms, started_at, completed_at";

impl SqliteRepository {
    /// Open (and migrate) a database at `path`, creating it if missing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Open the database at `~/.config/pomo/pomo.db`.
    pub fn open_default() -> Result<Self, RepositoryError> {
        Self::open(data_dir()?.join("pomo.db"))
    }

    /// Open an in-memory database. Useful for tests and ephemeral runs;
    /// nothing survives the process.
    pub fn open_memory() -> Result<Self, RepositoryError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, RepositoryError> {
        migrate(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn migrate(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS intervals (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            category     TEXT NOT NULL,
            state        TEXT NOT NULL,
            planned_ms   INTEGER NOT NULL,
            actual_ms    INTEGER NOT NULL,
            started_at   TEXT,
            completed_at TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_intervals_state ON intervals(state);
        CREATE INDEX IF NOT EXISTS idx_intervals_category_state
            ON intervals(category, state);",
    )
}

fn decode(row: Row) -> Result<Interval, RepositoryError> {
    let (id, category, state, planned_ms, actual_ms, started_at, completed_at) = row;
    let category = Category::parse(&category)
        .ok_or_else(|| RepositoryError::Corrupt(format!("unknown category {category:?}")))?;
    let state = IntervalState::parse(&state)
        .ok_or_else(|| RepositoryError::Corrupt(format!("unknown state {state:?}")))?;
    if planned_ms < 0 || actual_ms < 0 {
        return Err(RepositoryError::Corrupt(format!(
            "negative duration on interval {id}"
        )));
    }
    Ok(Interval {
        id,
        category,
        state,
        planned: Duration::from_millis(planned_ms as u64),
        actual: Duration::from_millis(actual_ms as u64),
        started_at: decode_timestamp(id, started_at)?,
        completed_at: decode_timestamp(id, completed_at)?,
    })
}

fn decode_timestamp(
    id: i64,
    value: Option<String>,
) -> Result<Option<DateTime<Utc>>, RepositoryError> {
    value
        .map(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|e| {
                    RepositoryError::Corrupt(format!("bad timestamp on interval {id}: {e}"))
                })
        })
        .transpose()
}

fn encode_timestamp(value: Option<DateTime<Utc>>) -> Option<String> {
    value.map(|t| t.to_rfc3339())
}

fn duration_ms(d: Duration) -> i64 {
    i64::try_from(d.as_millis()).unwrap_or(i64::MAX)
}

fn read_row(row: &rusqlite::Row<'_>) -> Result<Row, rusqlite::Error> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
    ))
}

impl IntervalRepository for SqliteRepository {
    fn create(&self, interval: Interval) -> Result<Interval, RepositoryError> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO intervals (category, state, planned_ms, actual_ms, started_at, completed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                interval.category.as_str(),
                interval.state.as_str(),
                duration_ms(interval.planned),
                duration_ms(interval.actual),
                encode_timestamp(interval.started_at),
                encode_timestamp(interval.completed_at),
            ],
        )?;
        let mut stored = interval;
        stored.id = conn.last_insert_rowid();
        Ok(stored)
    }

    fn update(&self, interval: &Interval) -> Result<(), RepositoryError> {
        let changed = self.conn().execute(
            "UPDATE intervals
             SET category = ?2, state = ?3, planned_ms = ?4, actual_ms = ?5,
                 started_at = ?6, completed_at = ?7
             WHERE id = ?1",
            params![
                interval.id,
                interval.category.as_str(),
                interval.state.as_str(),
                duration_ms(interval.planned),
                duration_ms(interval.actual),
                encode_timestamp(interval.started_at),
                encode_timestamp(interval.completed_at),
            ],
        )?;
        if changed == 0 {
            return Err(RepositoryError::NotFound(interval.id));
        }
        Ok(())
    }

    fn update_if_state(
        &self,
        interval: &Interval,
        expected: IntervalState,
    ) -> Result<bool, RepositoryError> {
        let conn = self.conn();
        let changed = conn.execute(
            "UPDATE intervals
             SET category = ?3, state = ?4, planned_ms = ?5, actual_ms = ?6,
                 started_at = ?7, completed_at = ?8
             WHERE id = ?1 AND state = ?2",
            params![
                interval.id,
                expected.as_str(),
                interval.category.as_str(),
                interval.state.as_str(),
                duration_ms(interval.planned),
                duration_ms(interval.actual),
                encode_timestamp(interval.started_at),
                encode_timestamp(interval.completed_at),
            ],
        )?;
        if changed == 1 {
            return Ok(true);
        }
        // Distinguish a lost race from a missing record.
        let exists = conn
            .query_row(
                "SELECT 1 FROM intervals WHERE id = ?1",
                params![interval.id],
                |_| Ok(()),
            )
            .optional()?
            .is_some();
        if exists {
            Ok(false)
        } else {
            Err(RepositoryError::NotFound(interval.id))
        }
    }

    fn by_id(&self, id: i64) -> Result<Interval, RepositoryError> {
        let row = self
            .conn()
            .query_row(
                &format!("SELECT {SELECT_COLUMNS} FROM intervals WHERE id = ?1"),
                params![id],
                read_row,
            )
            .optional()?
            .ok_or(RepositoryError::NotFound(id))?;
        decode(row)
    }

    fn last(&self) -> Result<Interval, RepositoryError> {
        let row = self
            .conn()
            .query_row(
                &format!("SELECT {SELECT_COLUMNS} FROM intervals ORDER BY id DESC LIMIT 1"),
                [],
                read_row,
            )
            .optional()?
            .ok_or(RepositoryError::NoIntervals)?;
        decode(row)
    }

    fn history(&self) -> Result<Vec<Interval>, RepositoryError> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare(&format!("SELECT {SELECT_COLUMNS} FROM intervals ORDER BY id DESC"))?;
        let rows = stmt.query_map([], read_row)?;
        let mut intervals = Vec::new();
        for row in rows {
            intervals.push(decode(row?)?);
        }
        Ok(intervals)
    }
}
