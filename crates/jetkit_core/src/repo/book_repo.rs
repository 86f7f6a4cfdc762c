//! Reading-tracker book repository.
//!
//! # Responsibility
//! - Persist `Book` records and assign identity on first insert.
//!
//! # Invariants
//! - Books are listed in insertion order.
//! - `update_book`/`delete_book` require an assigned id.

use crate::model::book::{Book, BookId};
use crate::repo::{ensure_changed, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const BOOK_SELECT_SQL: &str = "SELECT
    id,
    title,
    authors,
    notes,
    rating,
    google_book_id,
    user_id,
    started_reading,
    finished_reading
FROM books";

/// Repository interface for tracked books.
pub trait BookRepository {
    fn list_books(&self) -> RepoResult<Vec<Book>>;
    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>>;
    /// Persists the book, generating an id when `book.id` is `None`.
    fn insert_book(&self, book: &Book) -> RepoResult<BookId>;
    fn update_book(&self, book: &Book) -> RepoResult<()>;
    fn delete_book(&self, id: BookId) -> RepoResult<()>;
    fn delete_all_books(&self) -> RepoResult<usize>;
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn list_books(&self) -> RepoResult<Vec<Book>> {
        let mut stmt = self.conn.prepare(&format!(
            "{BOOK_SELECT_SQL} ORDER BY created_at ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut books = Vec::new();
        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }
        Ok(books)
    }

    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_book_row(row)?));
        }
        Ok(None)
    }

    fn insert_book(&self, book: &Book) -> RepoResult<BookId> {
        book.validate()?;
        let id = book.id.unwrap_or_else(Uuid::new_v4);
        self.conn.execute(
            "INSERT INTO books (
                id,
                title,
                authors,
                notes,
                rating,
                google_book_id,
                user_id,
                started_reading,
                finished_reading
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                id.to_string(),
                book.title.as_str(),
                book.authors.as_str(),
                book.notes.as_deref(),
                book.rating,
                book.google_book_id.as_deref(),
                book.user_id.as_deref(),
                book.started_reading,
                book.finished_reading,
            ],
        )?;
        Ok(id)
    }

    fn update_book(&self, book: &Book) -> RepoResult<()> {
        book.validate()?;
        let id = book
            .id
            .ok_or_else(|| RepoError::InvalidData("cannot update a book without id".to_string()))?;
        let changed = self.conn.execute(
            "UPDATE books
             SET
                title = ?2,
                authors = ?3,
                notes = ?4,
                rating = ?5,
                google_book_id = ?6,
                user_id = ?7,
                started_reading = ?8,
                finished_reading = ?9
             WHERE id = ?1;",
            params![
                id.to_string(),
                book.title.as_str(),
                book.authors.as_str(),
                book.notes.as_deref(),
                book.rating,
                book.google_book_id.as_deref(),
                book.user_id.as_deref(),
                book.started_reading,
                book.finished_reading,
            ],
        )?;
        ensure_changed(changed, id)
    }

    fn delete_book(&self, id: BookId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM books WHERE id = ?1;", [id.to_string()])?;
        ensure_changed(changed, id)
    }

    fn delete_all_books(&self) -> RepoResult<usize> {
        Ok(self.conn.execute("DELETE FROM books;", [])?)
    }
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    let id_text: String = row.get("id")?;
    let book = Book {
        id: Some(parse_uuid(&id_text, "books.id")?),
        title: row.get("title")?,
        authors: row.get("authors")?,
        notes: row.get("notes")?,
        rating: row.get("rating")?,
        google_book_id: row.get("google_book_id")?,
        user_id: row.get("user_id")?,
        started_reading: row.get("started_reading")?,
        finished_reading: row.get("finished_reading")?,
    };
    book.validate()?;
    Ok(book)
}
