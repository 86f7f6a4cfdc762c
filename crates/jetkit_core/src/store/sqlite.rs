//! Per-table `EntityStore` implementations over the shared `Database`.

use super::{Database, EntityStore, Table};
use crate::model::book::{Book, BookId};
use crate::model::favorite::{Favorite, UnitSetting};
use crate::model::note::{Note, NoteId};
use crate::repo::book_repo::{BookRepository, SqliteBookRepository};
use crate::repo::favorite_repo::{
    FavoriteRepository, SqliteFavoriteRepository, SqliteUnitRepository, UnitRepository,
};
use crate::repo::note_repo::{NoteRepository, SqliteNoteRepository};
use crate::repo::{RepoError, RepoResult};
use tokio::sync::watch;

/// Saved weather cities keyed by city name.
#[derive(Clone)]
pub struct FavoriteStore {
    db: Database,
}

impl FavoriteStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Looks up one favorite by exact city name.
    pub fn get(&self, city: &str) -> RepoResult<Option<Favorite>> {
        self.db
            .read(|conn| SqliteFavoriteRepository::new(conn).get_favorite(city))
    }
}

impl EntityStore for FavoriteStore {
    type Record = Favorite;
    type Id = String;

    fn name(&self) -> &'static str {
        Table::Favorites.as_str()
    }

    fn get_all(&self) -> RepoResult<Vec<Favorite>> {
        self.db
            .read(|conn| SqliteFavoriteRepository::new(conn).list_favorites())
    }

    fn insert(&self, record: &Favorite) -> RepoResult<String> {
        self.db.write(Table::Favorites, |conn| {
            SqliteFavoriteRepository::new(conn).insert_favorite(record)
        })
    }

    fn update(&self, record: &Favorite) -> RepoResult<()> {
        self.db.write(Table::Favorites, |conn| {
            SqliteFavoriteRepository::new(conn).update_favorite(record)
        })
    }

    fn delete(&self, id: &String) -> RepoResult<()> {
        self.db.write(Table::Favorites, |conn| {
            SqliteFavoriteRepository::new(conn).delete_favorite(id)
        })
    }

    fn delete_all(&self) -> RepoResult<usize> {
        self.db.write(Table::Favorites, |conn| {
            SqliteFavoriteRepository::new(conn).delete_all_favorites()
        })
    }

    fn changes(&self) -> watch::Receiver<u64> {
        self.db.changes(Table::Favorites)
    }
}

/// Unit setting rows keyed by unit name.
#[derive(Clone)]
pub struct UnitStore {
    db: Database,
}

impl UnitStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Replaces every stored unit with `unit` as one change.
    pub fn replace(&self, unit: &UnitSetting) -> RepoResult<String> {
        self.db.write(Table::Units, |conn| {
            let tx = conn.unchecked_transaction()?;
            let repo = SqliteUnitRepository::new(&tx);
            repo.delete_all_units()?;
            let stored = repo.insert_unit(unit)?;
            tx.commit()?;
            Ok(stored)
        })
    }
}

impl EntityStore for UnitStore {
    type Record = UnitSetting;
    type Id = String;

    fn name(&self) -> &'static str {
        Table::Units.as_str()
    }

    fn get_all(&self) -> RepoResult<Vec<UnitSetting>> {
        self.db.read(|conn| SqliteUnitRepository::new(conn).list_units())
    }

    fn insert(&self, record: &UnitSetting) -> RepoResult<String> {
        self.db.write(Table::Units, |conn| {
            SqliteUnitRepository::new(conn).insert_unit(record)
        })
    }

    /// Units carry no attributes besides their identity, so an update only
    /// checks that the row exists and leaves row order untouched.
    fn update(&self, record: &UnitSetting) -> RepoResult<()> {
        record.validate()?;
        let exists = self.db.read(|conn| {
            Ok(SqliteUnitRepository::new(conn)
                .list_units()?
                .iter()
                .any(|stored| stored.unit == record.unit))
        })?;
        if !exists {
            return Err(RepoError::NotFound(record.unit.clone()));
        }
        Ok(())
    }

    fn delete(&self, id: &String) -> RepoResult<()> {
        self.db
            .write(Table::Units, |conn| SqliteUnitRepository::new(conn).delete_unit(id))
    }

    fn delete_all(&self) -> RepoResult<usize> {
        self.db.write(Table::Units, |conn| {
            SqliteUnitRepository::new(conn).delete_all_units()
        })
    }

    fn changes(&self) -> watch::Receiver<u64> {
        self.db.changes(Table::Units)
    }
}

/// Notes keyed by generated id.
#[derive(Clone)]
pub struct NoteStore {
    db: Database,
}

impl NoteStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn get(&self, id: NoteId) -> RepoResult<Option<Note>> {
        self.db.read(|conn| SqliteNoteRepository::new(conn).get_note(id))
    }
}

impl EntityStore for NoteStore {
    type Record = Note;
    type Id = NoteId;

    fn name(&self) -> &'static str {
        Table::Notes.as_str()
    }

    fn get_all(&self) -> RepoResult<Vec<Note>> {
        self.db.read(|conn| SqliteNoteRepository::new(conn).list_notes())
    }

    fn insert(&self, record: &Note) -> RepoResult<NoteId> {
        self.db
            .write(Table::Notes, |conn| SqliteNoteRepository::new(conn).insert_note(record))
    }

    fn update(&self, record: &Note) -> RepoResult<()> {
        self.db
            .write(Table::Notes, |conn| SqliteNoteRepository::new(conn).update_note(record))
    }

    fn delete(&self, id: &NoteId) -> RepoResult<()> {
        self.db
            .write(Table::Notes, |conn| SqliteNoteRepository::new(conn).delete_note(*id))
    }

    fn delete_all(&self) -> RepoResult<usize> {
        self.db
            .write(Table::Notes, |conn| SqliteNoteRepository::new(conn).delete_all_notes())
    }

    fn changes(&self) -> watch::Receiver<u64> {
        self.db.changes(Table::Notes)
    }
}

/// Tracked books keyed by id assigned on insert.
#[derive(Clone)]
pub struct BookStore {
    db: Database,
}

impl BookStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn get(&self, id: BookId) -> RepoResult<Option<Book>> {
        self.db.read(|conn| SqliteBookRepository::new(conn).get_book(id))
    }

    /// Loads, edits and saves one book under a single connection lock.
    pub fn modify(&self, id: BookId, edit: impl FnOnce(&mut Book)) -> RepoResult<Book> {
        self.db.write(Table::Books, |conn| {
            let repo = SqliteBookRepository::new(conn);
            let mut book = repo
                .get_book(id)?
                .ok_or_else(|| RepoError::NotFound(id.to_string()))?;
            edit(&mut book);
            repo.update_book(&book)?;
            Ok(book)
        })
    }
}

impl EntityStore for BookStore {
    type Record = Book;
    type Id = BookId;

    fn name(&self) -> &'static str {
        Table::Books.as_str()
    }

    fn get_all(&self) -> RepoResult<Vec<Book>> {
        self.db.read(|conn| SqliteBookRepository::new(conn).list_books())
    }

    fn insert(&self, record: &Book) -> RepoResult<BookId> {
        self.db
            .write(Table::Books, |conn| SqliteBookRepository::new(conn).insert_book(record))
    }

    fn update(&self, record: &Book) -> RepoResult<()> {
        self.db
            .write(Table::Books, |conn| SqliteBookRepository::new(conn).update_book(record))
    }

    fn delete(&self, id: &BookId) -> RepoResult<()> {
        self.db
            .write(Table::Books, |conn| SqliteBookRepository::new(conn).delete_book(*id))
    }

    fn delete_all(&self) -> RepoResult<usize> {
        self.db
            .write(Table::Books, |conn| SqliteBookRepository::new(conn).delete_all_books())
    }

    fn changes(&self) -> watch::Receiver<u64> {
        self.db.changes(Table::Books)
    }
}
