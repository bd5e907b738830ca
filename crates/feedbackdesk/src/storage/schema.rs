//! `SQLite` schema definitions for feedbackdesk.
//!
//! This module contains the SQL statements for creating the feedback table
//! and the function that applies them.

use rusqlite::Connection;

use crate::error::Result;

/// SQL statement to create the feedback table.
///
/// The timestamp is filled in by `SQLite` at insert time as RFC 3339 UTC with
/// millisecond precision.
pub const CREATE_FEEDBACK_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS feedback (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    feedback TEXT NOT NULL,
    timestamp TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
)
";

/// SQL statement to create an index on timestamp for the newest-first listing.
pub const CREATE_TIMESTAMP_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_feedback_timestamp ON feedback(timestamp DESC)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_FEEDBACK_TABLE, CREATE_TIMESTAMP_INDEX];

/// Create the table and index if they don't exist. Safe to call repeatedly.
///
/// # Errors
///
/// Returns an error if any statement fails.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        conn.execute(statement, [])?;
    }
    Ok(())
}
