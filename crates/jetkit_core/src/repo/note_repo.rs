//! Note repository contract and SQLite implementation.
//!
//! # Invariants
//! - Notes are listed by `entry_date DESC, id ASC`.
//! - Inserts replace an existing row with the same id.

use crate::model::note::{Note, NoteId};
use crate::repo::{ensure_changed, parse_uuid, RepoResult};
use rusqlite::{params, Connection, Row};

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    entry_date
FROM notes";

/// Repository interface for notes.
pub trait NoteRepository {
    fn list_notes(&self) -> RepoResult<Vec<Note>>;
    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>>;
    fn insert_note(&self, note: &Note) -> RepoResult<NoteId>;
    fn update_note(&self, note: &Note) -> RepoResult<()>;
    fn delete_note(&self, id: NoteId) -> RepoResult<()>;
    fn delete_all_notes(&self) -> RepoResult<usize>;
}

/// SQLite-backed notes repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn list_notes(&self) -> RepoResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} ORDER BY entry_date DESC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }
        Ok(notes)
    }

    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }
        Ok(None)
    }

    fn insert_note(&self, note: &Note) -> RepoResult<NoteId> {
        note.validate()?;
        self.conn.execute(
            "INSERT OR REPLACE INTO notes (id, title, description, entry_date)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                note.id.to_string(),
                note.title.as_str(),
                note.description.as_str(),
                note.entry_date,
            ],
        )?;
        Ok(note.id)
    }

    fn update_note(&self, note: &Note) -> RepoResult<()> {
        note.validate()?;
        let changed = self.conn.execute(
            "UPDATE notes
             SET
                title = ?2,
                description = ?3,
                entry_date = ?4
             WHERE id = ?1;",
            params![
                note.id.to_string(),
                note.title.as_str(),
                note.description.as_str(),
                note.entry_date,
            ],
        )?;
        ensure_changed(changed, note.id)
    }

    fn delete_note(&self, id: NoteId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1;", [id.to_string()])?;
        ensure_changed(changed, id)
    }

    fn delete_all_notes(&self) -> RepoResult<usize> {
        Ok(self.conn.execute("DELETE FROM notes;", [])?)
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let id_text: String = row.get("id")?;
    let note = Note {
        id: parse_uuid(&id_text, "notes.id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        entry_date: row.get("entry_date")?,
    };
    note.validate()?;
    Ok(note)
}
