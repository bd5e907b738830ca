//! Core feedback types.
//!
//! A [`NewFeedback`] is a validated entry that has not been stored yet; it can
//! only be obtained through [`crate::validation::validate`]. A
//! [`FeedbackRecord`] is what the store hands back once the entry has an id and
//! a timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A validated feedback entry awaiting insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) feedback: String,
}

impl NewFeedback {
    /// The submitter's name, trimmed.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The submitter's email, trimmed and syntactically valid.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// The feedback body, trimmed.
    #[must_use]
    pub fn feedback(&self) -> &str {
        &self.feedback
    }
}

/// A persisted feedback entry.
///
/// Records are immutable once stored; `id` and `timestamp` are assigned by the
/// store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// Store-assigned identifier, never reused.
    pub id: i64,

    /// The submitter's name.
    pub name: String,

    /// The submitter's email address.
    pub email: String,

    /// The free-text feedback.
    pub feedback: String,

    /// When the store accepted this entry.
    pub timestamp: DateTime<Utc>,
}

impl FeedbackRecord {
    /// Check whether this record holds the same user-supplied content as `entry`.
    #[must_use]
    pub fn matches(&self, entry: &NewFeedback) -> bool {
        self.name == entry.name && self.email == entry.email && self.feedback == entry.feedback
    }
}
