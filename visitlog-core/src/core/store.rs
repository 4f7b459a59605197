//! The durable slot holding the visit collection.
//!
//! [`VisitStore`] is the seam between the repository and whatever backs it:
//! the repository is generic over the trait, so the SQLite file store can be
//! swapped for [`MemoryStore`] (tests, ephemeral sessions) or any other
//! durable backing without touching repository logic.

use crate::{Result, Visit, VisitlogError};
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

/// Fixed key the collection is stored under.
const SLOT_KEY: &str = "visits";

/// A durable slot for the full visit collection, read once at startup and
/// rewritten on every mutation.
pub trait VisitStore {
    /// Reads the stored collection. An absent slot is an empty collection,
    /// not an error.
    fn load(&self) -> Result<Vec<Visit>>;

    /// Replaces the slot contents with `visits`, atomically.
    fn save(&mut self, visits: &[Visit]) -> Result<()>;
}

/// File-backed store: one SQLite database holding the collection as a JSON
/// array in a single key/value row.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Creates (or re-opens) a store database at `path` and initialises the
    /// schema.
    ///
    /// # Errors
    ///
    /// Returns [`VisitlogError::Database`] for any SQLite failure.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self { conn })
    }

    /// Opens an existing store database at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`VisitlogError::InvalidStore`] if the file is not a Visitlog
    /// database, or [`VisitlogError::Database`] for any other SQLite failure.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Validate database structure
        let table_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master
             WHERE type='table' AND name='visit_log'",
            [],
            |row| row.get(0),
        )?;

        if table_count != 1 {
            return Err(VisitlogError::InvalidStore(
                "Not a valid Visitlog database".to_string(),
            ));
        }

        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl VisitStore for SqliteStore {
    fn load(&self) -> Result<Vec<Visit>> {
        let slot: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM visit_log WHERE key = ?1",
                [SLOT_KEY],
                |row| row.get(0),
            )
            .optional()?;

        match slot {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => {
                log::debug!("visit slot absent, starting with empty collection");
                Ok(Vec::new())
            }
        }
    }

    fn save(&mut self, visits: &[Visit]) -> Result<()> {
        let json = serde_json::to_string(visits)?;
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO visit_log (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![SLOT_KEY, json],
        )?;
        tx.commit()?;
        Ok(())
    }
}

/// In-memory store with the same contract as [`SqliteStore`]. Nothing
/// survives the process; used by tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    visits: Vec<Visit>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with `visits`, as if they had been persisted by a
    /// previous session.
    pub fn with_visits(visits: Vec<Visit>) -> Self {
        Self { visits }
    }
}

impl VisitStore for MemoryStore {
    fn load(&self) -> Result<Vec<Visit>> {
        Ok(self.visits.clone())
    }

    fn save(&mut self, visits: &[Visit]) -> Result<()> {
        self.visits = visits.to_vec();
        Ok(())
    }
}
