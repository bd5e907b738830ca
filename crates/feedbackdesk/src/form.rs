//! The feedback form controller.
//!
//! The form is a handful of free functions over explicit inputs: the draft the
//! user is editing, a [`FeedbackStore`], and the configured
//! [`AdminCredential`]. Nothing here knows about terminals; the CLI layer only
//! turns keystrokes into these calls and renders what comes back.

use std::fmt;

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::record::FeedbackRecord;
use crate::storage::FeedbackStore;
use crate::validation;

/// The unsaved values of the form's three inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    /// Single-line name input.
    pub name: String,
    /// Single-line email input.
    pub email: String,
    /// Multi-line feedback input.
    pub feedback: String,
}

impl Draft {
    /// Create a draft from the three field values.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        feedback: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            feedback: feedback.into(),
        }
    }

    /// Reset all three fields to empty.
    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.feedback.clear();
    }

    /// Check whether all three fields are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.feedback.is_empty()
    }
}

/// The configured admin secret guarding the View All action.
///
/// The secret is kept as a BLAKE3 digest so comparisons run in constant time;
/// two credentials match exactly when their strings are equal.
#[derive(Clone)]
pub struct AdminCredential {
    digest: Option<blake3::Hash>,
}

impl AdminCredential {
    /// Build a credential from the configured secret, if any.
    #[must_use]
    pub fn new(secret: Option<&str>) -> Self {
        Self {
            digest: secret.map(|s| blake3::hash(s.as_bytes())),
        }
    }

    /// Check whether an admin secret is configured at all.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.digest.is_some()
    }

    /// Check `attempt` against the configured secret.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AdminNotConfigured`] when no secret is set, or
    /// [`Error::Unauthorized`] on mismatch.
    pub fn verify(&self, attempt: &str) -> Result<()> {
        let Some(expected) = &self.digest else {
            return Err(Error::AdminNotConfigured);
        };
        if blake3::hash(attempt.as_bytes()) == *expected {
            Ok(())
        } else {
            Err(Error::Unauthorized)
        }
    }
}

impl fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredential")
            .field("configured", &self.is_configured())
            .finish()
    }
}

/// Submit the draft.
///
/// Validates the draft, inserts it, and clears the draft on success. On any
/// failure the draft is left exactly as it was so the user can fix and retry.
///
/// # Errors
///
/// Returns [`Error::Validation`] if the draft is incomplete or the email is
/// malformed, or a storage error if the insert fails.
pub fn submit<S: FeedbackStore + ?Sized>(store: &S, draft: &mut Draft) -> Result<i64> {
    let entry = validation::validate(draft)?;
    let id = store.insert(&entry)?;
    info!(id, "Feedback submitted");
    clear(draft);
    Ok(id)
}

/// Reset every draft field to empty. No validation is applied.
pub fn clear(draft: &mut Draft) {
    draft.clear();
}

/// Check the admin credential, then list every stored record.
///
/// The store is only consulted after the credential matches.
///
/// # Errors
///
/// Returns an authorization error on a bad or unconfigured credential, or a
/// storage error if the read fails.
pub fn authorize_and_list<S: FeedbackStore + ?Sized>(
    store: &S,
    admin: &AdminCredential,
    attempt: &str,
) -> Result<Vec<FeedbackRecord>> {
    if let Err(e) = admin.verify(attempt) {
        warn!("Rejected admin view: {e}");
        return Err(e);
    }
    store.list_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Field, ValidationError};
    use crate::storage::{MemoryStore, SqliteStore};

    fn alice() -> Draft {
        Draft::new("Alice", "alice@example.com", "Great service")
    }

    #[test]
    fn test_submit_inserts_and_clears() {
        let store = MemoryStore::new();
        let mut draft = alice();

        let id = submit(&store, &mut draft).unwrap();

        assert!(draft.is_empty());
        let records = store.list_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
        assert_eq!(records[0].name, "Alice");
    }

    #[test]
    fn test_submit_stores_trimmed_values() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut draft = Draft::new("  Alice  ", " alice@example.com ", "\nGreat service\n");

        submit(&store, &mut draft).unwrap();

        let records = store.list_all().unwrap();
        assert_eq!(records[0].name, "Alice");
        assert_eq!(records[0].email, "alice@example.com");
        assert_eq!(records[0].feedback, "Great service");
    }

    #[test]
    fn test_submit_validation_error_keeps_draft() {
        let store = MemoryStore::new();
        let mut draft = Draft::new("", "bob@example.com", "Hi");

        let err = submit(&store, &mut draft).unwrap_err();

        assert!(matches!(
            err,
            Error::Validation(ValidationError::MissingField(Field::Name))
        ));
        assert_eq!(draft, Draft::new("", "bob@example.com", "Hi"));
        assert_eq!(store.insert_calls(), 0);
    }

    #[test]
    fn test_submit_whitespace_only_fields_never_insert() {
        let store = MemoryStore::new();
        for mut draft in [
            Draft::new(" ", "bob@example.com", "Hi"),
            Draft::new("Bob", "\t", "Hi"),
            Draft::new("Bob", "bob@example.com", "  \n "),
        ] {
            let err = submit(&store, &mut draft).unwrap_err();
            assert!(err.is_validation());
        }
        assert_eq!(store.insert_calls(), 0);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_submit_invalid_email() {
        let store = MemoryStore::new();
        let mut draft = Draft::new("Bob", "bob@b", "Hi");

        let err = submit(&store, &mut draft).unwrap_err();

        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidEmail)
        ));
        assert_eq!(store.insert_calls(), 0);
    }

    #[test]
    fn test_submit_storage_failure_keeps_draft() {
        let store = MemoryStore::new();
        store.fail_writes(true);
        let mut draft = alice();

        let err = submit(&store, &mut draft).unwrap_err();

        assert!(err.is_storage());
        assert_eq!(draft, alice());
        assert_eq!(store.len(), 0);

        // Retry succeeds once the store recovers.
        store.fail_writes(false);
        submit(&store, &mut draft).unwrap();
        assert!(draft.is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear_resets_all_fields() {
        let mut draft = Draft::new("Bob", "not an email", "whatever");
        clear(&mut draft);
        assert_eq!(draft, Draft::default());

        let mut empty = Draft::default();
        clear(&mut empty);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_wrong_password_never_lists() {
        let store = MemoryStore::new();
        let mut draft = alice();
        submit(&store, &mut draft).unwrap();

        let admin = AdminCredential::new(Some("hunter2"));
        for attempt in ["", "hunter", "hunter2 ", "HUNTER2"] {
            let err = authorize_and_list(&store, &admin, attempt).unwrap_err();
            assert!(matches!(err, Error::Unauthorized));
        }
        assert_eq!(store.list_calls(), 0);
    }

    #[test]
    fn test_unconfigured_admin_never_lists() {
        let store = MemoryStore::new();
        let admin = AdminCredential::new(None);

        let err = authorize_and_list(&store, &admin, "password").unwrap_err();

        assert!(matches!(err, Error::AdminNotConfigured));
        assert!(err.is_authorization());
        assert_eq!(store.list_calls(), 0);
    }

    #[test]
    fn test_correct_password_lists() {
        let store = MemoryStore::new();
        let mut draft = alice();
        submit(&store, &mut draft).unwrap();

        let admin = AdminCredential::new(Some("hunter2"));
        let records = authorize_and_list(&store, &admin, "hunter2").unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(store.list_calls(), 1);
    }

    #[test]
    fn test_correct_password_empty_store() {
        let store = SqliteStore::open_in_memory().unwrap();
        let admin = AdminCredential::new(Some("hunter2"));

        let records = authorize_and_list(&store, &admin, "hunter2").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_list_failure_is_storage_error() {
        let store = MemoryStore::new();
        store.fail_reads(true);
        let admin = AdminCredential::new(Some("pw"));

        let err = authorize_and_list(&store, &admin, "pw").unwrap_err();
        assert!(err.is_storage());
    }

    #[test]
    fn test_admin_credential_debug_hides_secret() {
        let admin = AdminCredential::new(Some("hunter2"));
        let debug_str = format!("{admin:?}");
        assert!(!debug_str.contains("hunter2"));
        assert!(debug_str.contains("configured: true"));
    }

    #[test]
    fn test_admin_credential_empty_secret_is_exact() {
        let admin = AdminCredential::new(Some(""));
        assert!(admin.verify("").is_ok());
        assert!(admin.verify(" ").is_err());
    }
}
