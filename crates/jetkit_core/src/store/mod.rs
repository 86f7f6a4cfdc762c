//! Entity store contract and the shared SQLite database handle.
//!
//! # Responsibility
//! - Define the CRUD + change-notification seam consumed by
//!   `ObservableCollection`.
//! - Share one migrated connection between per-table stores.
//!
//! # Invariants
//! - Every successful mutation bumps the revision of its table's change feed.
//! - Reads never bump a revision.
//! - The connection lock is never held across an `.await`.

mod sqlite;

pub use sqlite::{BookStore, FavoriteStore, NoteStore, UnitStore};

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::repo::RepoResult;
use log::debug;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;

/// Persistent collaborator holding one kind of domain record.
pub trait EntityStore: Send + Sync + 'static {
    type Record: Clone + PartialEq + Send + Sync + 'static;
    type Id: Send + 'static;

    /// Short label used in log events.
    fn name(&self) -> &'static str;
    fn get_all(&self) -> RepoResult<Vec<Self::Record>>;
    /// Inserts `record` and returns its identity (assigned when absent).
    fn insert(&self, record: &Self::Record) -> RepoResult<Self::Id>;
    fn update(&self, record: &Self::Record) -> RepoResult<()>;
    fn delete(&self, id: &Self::Id) -> RepoResult<()>;
    fn delete_all(&self) -> RepoResult<usize>;
    /// Revision counter that changes after every completed mutation.
    fn changes(&self) -> watch::Receiver<u64>;
}

/// Tables with their own change feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Favorites,
    Units,
    Notes,
    Books,
}

impl Table {
    const ALL: [Table; 4] = [Table::Favorites, Table::Units, Table::Notes, Table::Books];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Favorites => "favorites",
            Self::Units => "units",
            Self::Notes => "notes",
            Self::Books => "books",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Favorites => 0,
            Self::Units => 1,
            Self::Notes => 2,
            Self::Books => 3,
        }
    }
}

struct DatabaseInner {
    conn: Mutex<Connection>,
    feeds: [watch::Sender<u64>; Table::ALL.len()],
}

/// Cloneable handle over one migrated SQLite connection.
#[derive(Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
}

impl Database {
    /// Opens (and migrates) a database file.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps an already migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        let feeds = Table::ALL.map(|_| watch::channel(0_u64).0);
        Self {
            inner: Arc::new(DatabaseInner {
                conn: Mutex::new(conn),
                feeds,
            }),
        }
    }

    pub fn favorites(&self) -> FavoriteStore {
        FavoriteStore::new(self.clone())
    }

    pub fn units(&self) -> UnitStore {
        UnitStore::new(self.clone())
    }

    pub fn notes(&self) -> NoteStore {
        NoteStore::new(self.clone())
    }

    pub fn books(&self) -> BookStore {
        BookStore::new(self.clone())
    }

    /// Runs a read against the shared connection.
    pub fn read<R>(&self, f: impl FnOnce(&Connection) -> RepoResult<R>) -> RepoResult<R> {
        let conn = self
            .inner
            .conn
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&conn)
    }

    /// Runs a mutation and notifies `table` subscribers when it succeeds.
    pub fn write<R>(
        &self,
        table: Table,
        f: impl FnOnce(&Connection) -> RepoResult<R>,
    ) -> RepoResult<R> {
        let value = self.read(f)?;
        self.notify(table);
        Ok(value)
    }

    /// Subscribes to the revision counter of `table`.
    pub fn changes(&self, table: Table) -> watch::Receiver<u64> {
        self.inner.feeds[table.index()].subscribe()
    }

    fn notify(&self, table: Table) {
        let feed = &self.inner.feeds[table.index()];
        feed.send_modify(|revision| *revision = revision.wrapping_add(1));
        debug!(
            "event=store_changed module=store table={} revision={}",
            table.as_str(),
            *feed.borrow()
        );
    }
}
