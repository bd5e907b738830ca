//! In-memory feedback store.
//!
//! Keeps records in a `Vec` and counts calls so tests can assert which
//! gateway operations a controller action touched. Writes and reads can be
//! made to fail on demand.

use std::cell::{Cell, RefCell};

use chrono::Utc;

use super::FeedbackStore;
use crate::error::{Error, Result};
use crate::record::{FeedbackRecord, NewFeedback};

/// A `FeedbackStore` held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<Vec<FeedbackRecord>>,
    next_id: Cell<i64>,
    insert_calls: Cell<usize>,
    list_calls: Cell<usize>,
    fail_writes: Cell<bool>,
    fail_reads: Cell<bool>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent inserts fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Make subsequent listings fail (or succeed again).
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    /// Number of times `insert` was called, including failed calls.
    #[must_use]
    pub fn insert_calls(&self) -> usize {
        self.insert_calls.get()
    }

    /// Number of times `list_all` was called, including failed calls.
    #[must_use]
    pub fn list_calls(&self) -> usize {
        self.list_calls.get()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    /// Check if no records are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl FeedbackStore for MemoryStore {
    fn initialize(&self) -> Result<()> {
        Ok(())
    }

    fn insert(&self, entry: &NewFeedback) -> Result<i64> {
        self.insert_calls.set(self.insert_calls.get() + 1);
        if self.fail_writes.get() {
            return Err(Error::storage_unavailable("simulated write failure"));
        }

        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.records.borrow_mut().push(FeedbackRecord {
            id,
            name: entry.name().to_string(),
            email: entry.email().to_string(),
            feedback: entry.feedback().to_string(),
            timestamp: Utc::now(),
        });
        Ok(id)
    }

    fn list_all(&self) -> Result<Vec<FeedbackRecord>> {
        self.list_calls.set(self.list_calls.get() + 1);
        if self.fail_reads.get() {
            return Err(Error::storage_unavailable("simulated read failure"));
        }

        let mut records = self.records.borrow().clone();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Draft;
    use crate::validation::validate;

    fn entry(name: &str) -> NewFeedback {
        validate(&Draft::new(name, "x@example.com", "hello")).unwrap()
    }

    #[test]
    fn test_counts_calls() {
        let store = MemoryStore::new();
        store.insert(&entry("a")).unwrap();
        store.list_all().unwrap();
        store.list_all().unwrap();

        assert_eq!(store.insert_calls(), 1);
        assert_eq!(store.list_calls(), 2);
    }

    #[test]
    fn test_newest_first() {
        let store = MemoryStore::new();
        store.insert(&entry("first")).unwrap();
        store.insert(&entry("second")).unwrap();

        let records = store.list_all().unwrap();
        assert_eq!(records[0].name, "second");
        assert_eq!(records[1].name, "first");
    }

    #[test]
    fn test_failed_write_stores_nothing() {
        let store = MemoryStore::new();
        store.fail_writes(true);

        assert!(store.insert(&entry("a")).is_err());
        assert!(store.is_empty());
        assert_eq!(store.insert_calls(), 1);
    }
}
