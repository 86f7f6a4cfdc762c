//! Entity records shared by the weather, notes, reading and trivia apps.
//!
//! # Responsibility
//! - Define value objects persisted by the entity stores or returned by
//!   remote calls.
//! - Provide write-path validation used by repositories.
//!
//! # Invariants
//! - Every persisted record has an identity unique within its table.
//! - Records are immutable by convention; edits build a new value.

pub mod book;
pub mod favorite;
pub mod note;
pub mod query;
pub mod question;
pub mod weather;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failure raised before a record is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty after trimming.
    BlankField(&'static str),
    /// Rating outside of `0..=5`.
    RatingOutOfRange(u8),
    /// `finished_reading` is earlier than `started_reading`.
    FinishedBeforeStarted { started: i64, finished: i64 },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "`{field}` must not be blank"),
            Self::RatingOutOfRange(value) => {
                write!(f, "rating {value} is outside of the 0..=5 range")
            }
            Self::FinishedBeforeStarted { started, finished } => write!(
                f,
                "finished_reading ({finished}) is earlier than started_reading ({started})"
            ),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(())
}
