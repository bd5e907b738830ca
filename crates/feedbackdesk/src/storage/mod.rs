//! Storage layer for feedbackdesk.
//!
//! The [`FeedbackStore`] trait is the gateway the form talks to. [`SqliteStore`]
//! is the real implementation over a single local database file;
//! [`MemoryStore`] and [`Unavailable`] cover tests and degraded mode.

mod memory;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::record::{FeedbackRecord, NewFeedback};

pub use memory::MemoryStore;

/// The gateway mediating all reads and writes of feedback records.
///
/// Records are append-only: there is no update or delete.
pub trait FeedbackStore {
    /// Ensure the backing table exists. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the schema cannot be created.
    fn initialize(&self) -> Result<()>;

    /// Append one record and return its store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    fn insert(&self, entry: &NewFeedback) -> Result<i64>;

    /// Return every record, most recent first.
    ///
    /// An empty store yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the read fails.
    fn list_all(&self) -> Result<Vec<FeedbackRecord>>;
}

/// `SQLite`-backed feedback store.
///
/// The connection is held for the lifetime of the store and closed when it
/// is dropped.
#[derive(Debug)]
pub struct SqliteStore {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl SqliteStore {
    /// Open or create a feedback database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist,
    /// then initializes the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema
    /// initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        let store = Self { path, conn };
        store.initialize()?;

        info!("Database opened at {}", store.path.display());
        Ok(store)
    }

    /// Create an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        let store = Self {
            path: PathBuf::from(":memory:"),
            conn,
        };
        store.initialize()?;
        Ok(store)
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Count stored records.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM feedback", [], |row| row.get(0))?;
        Ok(count)
    }

    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<FeedbackRecord> {
        let timestamp_str: String = row.get(4)?;
        let timestamp = parse_timestamp(&timestamp_str)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

        Ok(FeedbackRecord {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            feedback: row.get(3)?,
            timestamp,
        })
    }
}

impl FeedbackStore for SqliteStore {
    fn initialize(&self) -> Result<()> {
        schema::initialize_schema(&self.conn)
    }

    fn insert(&self, entry: &NewFeedback) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO feedback (name, email, feedback) VALUES (?1, ?2, ?3)",
            params![entry.name(), entry.email(), entry.feedback()],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("Inserted feedback with id {}", id);
        Ok(id)
    }

    fn list_all(&self) -> Result<Vec<FeedbackRecord>> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT id, name, email, feedback, timestamp
            FROM feedback ORDER BY timestamp DESC, id DESC
            ",
        )?;

        let records = stmt
            .query_map([], Self::row_to_record)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!("Listed {} feedback records", records.len());
        Ok(records)
    }
}

/// Parse a stored timestamp.
///
/// Rows written by this crate are RFC 3339. Databases created by older
/// tooling used `SQLite`'s `CURRENT_TIMESTAMP` (`YYYY-MM-DD HH:MM:SS`, UTC),
/// which is accepted too.
fn parse_timestamp(s: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|dt| dt.and_utc()))
}

/// A store that refuses every operation.
///
/// Used when the database could not be opened at startup so the form can
/// keep running without persistence; every action reports why.
#[derive(Debug, Clone)]
pub struct Unavailable {
    reason: String,
}

impl Unavailable {
    /// Create an unavailable store remembering why it is unavailable.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl FeedbackStore for Unavailable {
    fn initialize(&self) -> Result<()> {
        Err(Error::storage_unavailable(&self.reason))
    }

    fn insert(&self, _entry: &NewFeedback) -> Result<i64> {
        Err(Error::storage_unavailable(&self.reason))
    }

    fn list_all(&self) -> Result<Vec<FeedbackRecord>> {
        Err(Error::storage_unavailable(&self.reason))
    }
}
