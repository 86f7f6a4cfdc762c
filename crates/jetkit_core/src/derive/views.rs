//! Favorites lookup, reading-status buckets and stats counts.

use crate::model::book::{Book, ReadingStatus};
use crate::model::favorite::{Favorite, UnitSetting, UnitSystem};

/// Books split by reading status, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusBuckets {
    /// Timestamp (epoch ms) the partition was computed for.
    pub as_of: i64,
    pub unstarted: Vec<Book>,
    pub in_progress: Vec<Book>,
    pub finished: Vec<Book>,
}

impl StatusBuckets {
    pub fn len(&self) -> usize {
        self.unstarted.len() + self.in_progress.len() + self.finished.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Counts shown on the stats screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadingStats {
    pub reading_count: usize,
    pub finished_count: usize,
}

/// Partitions `books` into unstarted / in-progress / finished.
///
/// A finish timestamp puts a book in `finished` whatever its start
/// timestamp says. Every input book lands in exactly one bucket.
pub fn partition_by_status(books: &[Book], now: i64) -> StatusBuckets {
    let mut buckets = StatusBuckets {
        as_of: now,
        ..StatusBuckets::default()
    };
    for book in books {
        let bucket = match book.status() {
            ReadingStatus::Unstarted => &mut buckets.unstarted,
            ReadingStatus::InProgress => &mut buckets.in_progress,
            ReadingStatus::Finished => &mut buckets.finished,
        };
        bucket.push(book.clone());
    }
    buckets
}

/// Counts in-progress and finished books.
pub fn compute_stats(books: &[Book]) -> ReadingStats {
    // `as_of` does not affect bucket membership.
    let buckets = partition_by_status(books, 0);
    ReadingStats {
        reading_count: buckets.in_progress.len(),
        finished_count: buckets.finished.len(),
    }
}

/// Returns whether `city` is saved. Matching is exact and case-sensitive.
pub fn is_favorite(city: &str, favorites: &[Favorite]) -> bool {
    find_favorite(city, favorites).is_some()
}

pub fn find_favorite<'a>(city: &str, favorites: &'a [Favorite]) -> Option<&'a Favorite> {
    favorites.iter().find(|favorite| favorite.city == city)
}

/// Books owned by `user_id`. Books without an owner are excluded.
pub fn books_for_user(books: &[Book], user_id: &str) -> Vec<Book> {
    books
        .iter()
        .filter(|book| book.user_id.as_deref() == Some(user_id))
        .cloned()
        .collect()
}

/// Rated strictly above four.
pub fn is_highly_rated(book: &Book) -> bool {
    book.rating.is_some_and(|rating| rating > 4)
}

/// First stored unit that parses; imperial when none does.
pub fn preferred_unit(units: &[UnitSetting]) -> UnitSystem {
    units
        .iter()
        .find_map(|setting| UnitSystem::parse(&setting.unit))
        .unwrap_or_default()
}
