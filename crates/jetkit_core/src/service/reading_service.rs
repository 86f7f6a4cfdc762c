//! Reading-tracker use-cases.
//!
//! # Responsibility
//! - Book search and details fetches keyed by query / volume id.
//! - Status transitions (`mark_started`, `mark_finished`) and reviews.
//! - Status buckets and stats over the live book collection.
//!
//! # Invariants
//! - Start/finish timestamps are set once; repeating a transition keeps the
//!   first timestamp.
//! - Read-modify-write transitions hold the connection lock throughout.

use crate::derive::views::{books_for_user, compute_stats, partition_by_status};
use crate::derive::{ReadingStats, StatusBuckets};
use crate::model::book::{Book, BookId, BookVolume};
use crate::model::query::SearchQuery;
use crate::reactive::{
    AsyncResult, FetchController, FetchTicket, MutationError, ObservableCollection, Producer,
};
use crate::store::{BookStore, Database};
use std::sync::Arc;

pub struct ReadingService {
    books: ObservableCollection<BookStore>,
    search: FetchController<SearchQuery, Vec<BookVolume>>,
    details: FetchController<String, BookVolume>,
}

impl ReadingService {
    /// Must be called inside a tokio runtime.
    pub fn new(
        db: &Database,
        search_api: impl Producer<SearchQuery, Vec<BookVolume>> + 'static,
        details_api: impl Producer<String, BookVolume> + 'static,
    ) -> Self {
        Self {
            books: ObservableCollection::open(Arc::new(db.books())),
            search: FetchController::new("book_search", search_api),
            details: FetchController::new("book_details", details_api),
        }
    }

    pub fn books(&self) -> &ObservableCollection<BookStore> {
        &self.books
    }

    pub fn search_results(&self) -> &FetchController<SearchQuery, Vec<BookVolume>> {
        &self.search
    }

    pub fn details(&self) -> &FetchController<String, BookVolume> {
        &self.details
    }

    /// Issues a search. Blank text is ignored and returns `None`.
    pub fn search(&self, text: &str) -> Option<FetchTicket> {
        let query = SearchQuery::parse(text)?;
        Some(self.search.fetch(query))
    }

    /// Loads one volume by remote id. Blank ids are ignored.
    pub fn load_details(&self, volume_id: &str) -> Option<FetchTicket> {
        let volume_id = volume_id.trim();
        if volume_id.is_empty() {
            return None;
        }
        Some(self.details.fetch(volume_id.to_string()))
    }

    /// Saves a searched volume as an unstarted book.
    pub async fn save_volume(
        &self,
        volume: &BookVolume,
        user_id: Option<&str>,
    ) -> Result<BookId, MutationError> {
        self.books.insert(volume.to_book(user_id)).await
    }

    pub async fn save_book(&self, book: Book) -> Result<BookId, MutationError> {
        self.books.insert(book).await
    }

    pub async fn remove_book(&self, id: BookId) -> Result<(), MutationError> {
        self.books.delete(id).await
    }

    /// Sets `started_reading` to `now` unless already set. A book finished
    /// without a start gets its start capped at the finish timestamp.
    pub async fn mark_started(&self, id: BookId, now: i64) -> Result<Book, MutationError> {
        self.modify("mark_started", id, move |book| {
            let started = book.finished_reading.map_or(now, |finished| finished.min(now));
            book.started_reading.get_or_insert(started);
        })
        .await
    }

    /// Sets `finished_reading` to `now` unless already set.
    pub async fn mark_finished(&self, id: BookId, now: i64) -> Result<Book, MutationError> {
        self.modify("mark_finished", id, move |book| {
            book.finished_reading.get_or_insert(now);
        })
        .await
    }

    /// Replaces rating and notes. Blank notes are stored as `None`.
    pub async fn update_review(
        &self,
        id: BookId,
        rating: Option<u8>,
        notes: Option<String>,
    ) -> Result<Book, MutationError> {
        let notes = notes.filter(|value| !value.trim().is_empty());
        self.modify("update_review", id, move |book| {
            book.rating = rating;
            book.notes = notes;
        })
        .await
    }

    /// Status buckets of the latest snapshot, optionally scoped to one owner.
    pub fn buckets(&self, user_id: Option<&str>, now: i64) -> AsyncResult<StatusBuckets> {
        self.scoped_books(user_id)
            .map(|books| partition_by_status(&books, now))
    }

    /// Stats of the latest snapshot, optionally scoped to one owner.
    pub fn stats(&self, user_id: Option<&str>) -> AsyncResult<ReadingStats> {
        self.scoped_books(user_id).map(|books| compute_stats(&books))
    }

    fn scoped_books(&self, user_id: Option<&str>) -> AsyncResult<Vec<Book>> {
        self.books.current().map(|books| match user_id {
            Some(user_id) => books_for_user(&books, user_id),
            None => books,
        })
    }

    async fn modify(
        &self,
        operation: &'static str,
        id: BookId,
        edit: impl FnOnce(&mut Book) + Send + 'static,
    ) -> Result<Book, MutationError> {
        self.books
            .apply(operation, move |store| store.modify(id, edit))
            .await
    }
}
