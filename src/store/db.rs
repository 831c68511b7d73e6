//! Database connection handling and schema bootstrap.

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::Connection;

use crate::error::{EngineError, EngineResult};

/// The selection engine's schema.
///
/// `selection_history.selected_date` carries a unique index so two racing
/// invocations can never both commit a record for the same date; the loser
/// hits a constraint conflict and reuses the winner's selection.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS person (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    mail TEXT UNIQUE NOT NULL,
    weekdays TEXT NOT NULL DEFAULT '1,2,3,4,5',
    last_chosen DATE
);

CREATE TABLE IF NOT EXISTS vacation (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    person_id INTEGER NOT NULL,
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    FOREIGN KEY (person_id) REFERENCES person(id)
);

CREATE TABLE IF NOT EXISTS selection_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    person_id INTEGER NOT NULL,
    selected_date DATE NOT NULL,
    FOREIGN KEY (person_id) REFERENCES person(id)
);

CREATE INDEX IF NOT EXISTS idx_vacation_person
    ON vacation(person_id);
CREATE INDEX IF NOT EXISTS idx_selection_history_person_date
    ON selection_history(person_id, selected_date);
CREATE UNIQUE INDEX IF NOT EXISTS idx_selection_history_date
    ON selection_history(selected_date);
";

/// Connection wrapper owning the engine's SQLite database.
///
/// Roster reads and history operations are implemented as methods on this
/// type in the sibling modules.
pub struct Database {
    pub(crate) conn: Connection,
}

impl Database {
    /// Opens (creating if necessary) the database at `path` and ensures the
    /// schema exists.
    pub fn open<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// Opens a private in-memory database. Used by tests.
    pub fn open_in_memory() -> EngineResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> EngineResult<Self> {
        conn.pragma_update(None, "foreign_keys", true)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }
}

/// Parses a stored ISO date column value.
pub(crate) fn parse_date(value: &str, field: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| EngineError::InvalidPerson {
        field: field.to_string(),
        message: format!("'{value}' is not an ISO date: {e}"),
    })
}

/// Parses an optional stored ISO date column value.
pub(crate) fn parse_optional_date(
    value: Option<String>,
    field: &str,
) -> EngineResult<Option<NaiveDate>> {
    value.map(|v| parse_date(&v, field)).transpose()
}
