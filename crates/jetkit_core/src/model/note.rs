//! Note record for the note-taking app.

use super::{require_text, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type NoteId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Generated on construction and stable for the note lifetime.
    pub id: NoteId,
    pub title: String,
    pub description: String,
    /// Unix epoch milliseconds.
    pub entry_date: i64,
}

impl Note {
    /// Creates a note with a fresh id.
    pub fn new(title: impl Into<String>, description: impl Into<String>, entry_date: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            entry_date,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)
    }
}
