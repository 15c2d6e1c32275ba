//! Task slot contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist the full task sequence under one fixed, version-tagged key.
//! - Load the sequence back across sessions.
//!
//! # Invariants
//! - `SLOT_KEY` never changes for this payload shape; a future format change
//!   requires a new key or manual migration.
//! - An absent slot loads as an empty sequence, not an error.
//! - A present but unparseable value loads as `SlotError::Corrupt`; callers
//!   decide whether to downgrade (the store falls back to empty).

use crate::db::DbError;
use crate::model::task::Task;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed slot key for the persisted task array, version-tagged.
pub const SLOT_KEY: &str = "tasks.v1";

pub type SlotResult<T> = Result<T, SlotError>;

/// Failure reading or writing the durable slot.
#[derive(Debug)]
pub enum SlotError {
    /// Storage transport failure (blocked, full, I/O).
    Db(DbError),
    /// Slot value exists but is not a valid task array.
    Corrupt(String),
    /// Task sequence could not be serialized.
    Serialize(String),
}

impl Display for SlotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Corrupt(message) => write!(f, "corrupt slot value: {message}"),
            Self::Serialize(message) => write!(f, "failed to serialize tasks: {message}"),
        }
    }
}

impl Error for SlotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Corrupt(_) => None,
            Self::Serialize(_) => None,
        }
    }
}

impl From<DbError> for SlotError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SlotError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable storage contract for the task sequence.
pub trait TaskSlot {
    /// Serializes and writes the full sequence in one upsert.
    fn save(&self, tasks: &[Task]) -> SlotResult<()>;

    /// Reads the sequence; absent slot yields an empty sequence.
    fn load(&self) -> SlotResult<Vec<Task>>;
}

/// SQLite-backed slot over the `slots` key-value table.
pub struct SqliteTaskSlot<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskSlot<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskSlot for SqliteTaskSlot<'_> {
    fn save(&self, tasks: &[Task]) -> SlotResult<()> {
        let payload =
            serde_json::to_string(tasks).map_err(|err| SlotError::Serialize(err.to_string()))?;

        self.conn.execute(
            "INSERT INTO slots (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![SLOT_KEY, payload],
        )?;

        Ok(())
    }

    fn load(&self) -> SlotResult<Vec<Task>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM slots WHERE key = ?1;",
                params![SLOT_KEY],
                |row| row.get(0),
            )
            .optional()?;

        let Some(payload) = payload else {
            return Ok(Vec::new());
        };

        serde_json::from_str::<Vec<Task>>(&payload)
            .map_err(|err| SlotError::Corrupt(err.to_string()))
    }
}
