//! `feedbackdesk` - A customer feedback form backed by a local `SQLite` store
//!
//! This library provides draft validation, the append-only feedback store, the
//! password-gated listing of stored entries, and the terminal front end that
//! drives them.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod record;
pub mod storage;
pub mod validation;

pub use config::Config;
pub use error::{Error, Field, Result, ValidationError};
pub use form::{authorize_and_list, clear, submit, AdminCredential, Draft};
pub use logging::init_logging;
pub use record::{FeedbackRecord, NewFeedback};
pub use storage::{FeedbackStore, MemoryStore, SqliteStore, Unavailable};
pub use validation::{validate, validate_email};
