//! Error types for feedbackdesk.
//!
//! This module defines all error types used throughout the feedbackdesk crate.
//! Errors fall into three user-facing kinds: validation failures on the draft,
//! authorization failures on the admin view, and storage failures against the
//! backing database. Configuration and I/O errors cover the ambient plumbing.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// A draft field that can be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The submitter's name.
    Name,
    /// The submitter's email address.
    Email,
    /// The free-text feedback body.
    Feedback,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Email => write!(f, "email"),
            Self::Feedback => write!(f, "feedback"),
        }
    }
}

/// Why a draft was rejected before reaching storage.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// A field was empty after trimming.
    #[error("All fields are required! (missing {0})")]
    MissingField(Field),

    /// The email did not match `local@domain.tld`.
    #[error("Please enter a valid email address!")]
    InvalidEmail,
}

/// The main error type for feedbackdesk operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Validation Errors ===
    /// The draft failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // === Authorization Errors ===
    /// The supplied admin credential did not match.
    #[error("Incorrect password!")]
    Unauthorized,

    /// No admin credential is configured, so the admin view is closed.
    #[error("admin password is not configured; set FEEDBACKDESK_ADMIN_PASSWORD or [admin] password")]
    AdminNotConfigured,

    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to create the directory holding the database.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Storage could not be initialized at startup; running without persistence.
    #[error("storage unavailable: {reason}")]
    StorageUnavailable {
        /// Why the store is unavailable.
        reason: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// Terminal or file system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for feedbackdesk operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a storage-unavailable error.
    #[must_use]
    pub fn storage_unavailable(reason: impl Into<String>) -> Self {
        Self::StorageUnavailable {
            reason: reason.into(),
        }
    }

    /// Check if this error is a rejected draft.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error is a failed admin check.
    #[must_use]
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::AdminNotConfigured)
    }

    /// Check if this error came from the backing store.
    #[must_use]
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Self::DatabaseOpen { .. }
                | Self::DatabaseQuery(_)
                | Self::DirectoryCreate { .. }
                | Self::StorageUnavailable { .. }
        )
    }
}
