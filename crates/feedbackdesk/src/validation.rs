//! Draft validation.
//!
//! Trims the three draft fields, rejects empty ones, and checks the email
//! against a simple `local@domain.tld` pattern. The check is purely syntactic;
//! no DNS or mailbox lookup is attempted.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Field, ValidationError};
use crate::form::Draft;
use crate::record::NewFeedback;

/// Email shape: one `@`, a local part of `[A-Za-z0-9._%+-]`, a domain of
/// `[A-Za-z0-9.-]`, and a final label of at least two letters.
pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"))
}

/// Check whether `email` has the shape `local@domain.tld`.
#[must_use]
pub fn validate_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Validate a draft and produce an entry ready for storage.
///
/// Fields are trimmed first. Emptiness is checked in form order (name, email,
/// feedback) before the email pattern.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] for the first empty field, or
/// [`ValidationError::InvalidEmail`] if the email is malformed.
pub fn validate(draft: &Draft) -> Result<NewFeedback, ValidationError> {
    let name = draft.name.trim();
    let email = draft.email.trim();
    let feedback = draft.feedback.trim();

    for (field, value) in [
        (Field::Name, name),
        (Field::Email, email),
        (Field::Feedback, feedback),
    ] {
        if value.is_empty() {
            return Err(ValidationError::MissingField(field));
        }
    }

    if !validate_email(email) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(NewFeedback {
        name: name.to_string(),
        email: email.to_string(),
        feedback: feedback.to_string(),
    })
}
