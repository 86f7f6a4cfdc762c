//! Note-taking use-cases.

use crate::model::note::{Note, NoteId};
use crate::reactive::{MutationError, ObservableCollection};
use crate::store::{Database, NoteStore};
use std::sync::Arc;

pub struct NoteService {
    notes: ObservableCollection<NoteStore>,
}

impl NoteService {
    /// Must be called inside a tokio runtime.
    pub fn new(db: &Database) -> Self {
        Self {
            notes: ObservableCollection::open(Arc::new(db.notes())),
        }
    }

    pub fn notes(&self) -> &ObservableCollection<NoteStore> {
        &self.notes
    }

    /// Creates and persists a note dated `entry_date` (epoch ms).
    pub async fn add_note(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        entry_date: i64,
    ) -> Result<Note, MutationError> {
        let note = Note::new(title, description, entry_date);
        self.notes.insert(note.clone()).await?;
        Ok(note)
    }

    pub async fn update_note(&self, note: Note) -> Result<(), MutationError> {
        self.notes.update(note).await
    }

    pub async fn remove_note(&self, id: NoteId) -> Result<(), MutationError> {
        self.notes.delete(id).await
    }

    pub async fn clear(&self) -> Result<usize, MutationError> {
        self.notes.delete_all().await
    }
}
